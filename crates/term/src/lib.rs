//! Terminal rendering for blockfall.
//!
//! Frames are drawn into a plain [`FrameBuffer`] by [`GameView`] (pure, no
//! I/O) and then flushed by [`TerminalRenderer`], which only rewrites runs of
//! glyphs that changed since the previous frame. Board cells are two columns wide so
//! the well looks roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{AnchorY, GameView, HostStatus, Viewport, PAUSE_BLINK_MS};
pub use renderer::{collect_runs, FrameEncoder, Run, TerminalRenderer};
