//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events 1:1 onto [`crate::types::Intent`]s. There is no
//! auto-repeat handling: every key press is one intent.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_mute_toggle, should_quit};
