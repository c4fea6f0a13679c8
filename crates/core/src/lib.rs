//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Timers are driven by the caller, never by a wall clock
//! - **Portable**: Can run in any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`shapes`]: Rotation tables and colors for the seven piece kinds
//! - [`rng`]: 7-bag piece supply with a seeded RNG
//! - [`grid`]: 10x20 cell matrix
//! - [`placement`]: Collision checks, moves, hard-drop target and lock
//! - [`scoring`]: Full-row detection, row removal, score and level rules
//! - [`session`]: The session state machine that owns all mutable state
//! - [`snapshot`]: Read model handed to renderers each frame
//! - [`driver`]: Host-side gravity and clear-delay timers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every kind appears exactly once per bag
//! - **Naive rotation**: rotation is a table lookup, blocked rotations are ignored
//! - **Soft drop locks**: a blocked downward move locks the piece immediately
//! - **Two-phase clears**: full rows are marked, then removed after a 180ms flash
//! - **Scoring**: `[0, 100, 300, 500, 800][rows] * (level + 1)`, level = lines / 10
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Driver, Phase, Session};
//! use blockfall_types::Intent;
//!
//! let mut session = Session::new(12345);
//! let mut driver = Driver::new();
//!
//! session.apply(Intent::MoveRight);
//! session.apply(Intent::Rotate);
//! session.apply(Intent::HardDrop);
//!
//! // One gravity period at level 0.
//! driver.advance(&mut session, 800);
//!
//! assert_eq!(session.phase(), Phase::Falling);
//! assert_eq!(session.grid().filled_count(), 4);
//! ```

pub mod driver;
pub mod grid;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use driver::Driver;
pub use grid::Grid;
pub use placement::{hard_drop_target, is_legal, lock, try_move, ActivePiece};
pub use rng::{new_bag, PieceSupply, SimpleRng};
pub use scoring::{clear_rows, find_full_rows, level_for, level_speed_ms, score_delta, RowSet};
pub use session::{Phase, Session};
pub use shapes::{color, shape_offsets};
pub use snapshot::SessionSnapshot;
