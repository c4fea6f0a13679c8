//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (3, 0), rotation 0, for every piece kind
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Host frame interval (~60 FPS) |
//! | `LINE_CLEAR_DELAY_MS` | 180 | Flash window between marking and removing full rows |
//!
//! # Gravity by Level
//!
//! `LEVEL_SPEED_MS[level]` is the gravity period in milliseconds. Levels past
//! the end of the table use the last entry (20ms).
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let intent = Intent::from_str("hardDrop").unwrap();
//! assert_eq!(intent, Intent::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a new piece's origin
pub const SPAWN_X: i8 = 3;

/// Spawn row of a new piece's origin
pub const SPAWN_Y: i8 = 0;

/// Number of rotation states per piece kind
pub const ROTATION_COUNT: u8 = 4;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Delay between marking full rows and removing them (180ms)
pub const LINE_CLEAR_DELAY_MS: u32 = 180;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// The supply appends a fresh bag once fewer than this many kinds remain queued
pub const SUPPLY_LOW_WATER: usize = 5;

/// Number of upcoming kinds exposed for preview (after `next_kind`)
pub const PREVIEW_LEN: usize = 5;

/// Gravity period by level (milliseconds per row)
///
/// Index 0 = Level 0, index 20 = Level 20+
pub const LEVEL_SPEED_MS: [u32; 21] = [
    800, 720, 630, 550, 470, 380, 300, 220, 130, 100, 80, 80, 80, 70, 70, 50, 50, 30, 30, 20, 20,
];

/// Line clear scoring table
///
/// Base points for clearing N rows with a single lock at level 0:
/// - 1 row: 100
/// - 2 rows: 300
/// - 3 rows: 500
/// - 4 rows: 800
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// 24-bit display color carried by filled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

/// A cell on the grid
///
/// Filled cells remember both the kind that produced them and its color, so a
/// renderer never has to consult the shape catalog for locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled { kind: PieceKind, color: Color },
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled { .. })
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Filled { kind, .. } => Some(*kind),
        }
    }
}

/// Movement requests understood by `Session::request_move`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    SoftDown,
    RotateCw,
}

impl Direction {
    /// `(dx, dy, drot)` applied by the placement engine
    pub fn delta(&self) -> (i8, i8, i8) {
        match self {
            Direction::Left => (-1, 0, 0),
            Direction::Right => (1, 0, 0),
            Direction::SoftDown => (0, 1, 0),
            Direction::RotateCw => (0, 0, 1),
        }
    }
}

/// Discrete host intents
///
/// Each intent maps 1:1 onto a session operation and carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it when blocked
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Toggle pause state
    TogglePause,
    /// Discard the session and start a new game
    Restart,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::Rotate,
        Intent::HardDrop,
        Intent::TogglePause,
        Intent::Restart,
    ];

    /// Parse intent from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("togglepause"), Some(Intent::TogglePause));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotate" => Some(Intent::Rotate),
            "harddrop" => Some(Intent::HardDrop),
            "togglepause" => Some(Intent::TogglePause),
            "restart" => Some(Intent::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::Rotate => "rotate",
            Intent::HardDrop => "hardDrop",
            Intent::TogglePause => "togglePause",
            Intent::Restart => "restart",
        }
    }

    /// The movement this intent requests, if it is a plain move
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Intent::MoveLeft => Some(Direction::Left),
            Intent::MoveRight => Some(Direction::Right),
            Intent::SoftDrop => Some(Direction::SoftDown),
            Intent::Rotate => Some(Direction::RotateCw),
            _ => None,
        }
    }
}

/// Engine-side notifications for the host to map onto audio/visual cues.
///
/// Events are queued in the order they happen and drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// A new active piece entered the board
    Spawned(PieceKind),
    /// The active piece moved or rotated
    PieceMoved,
    /// The active piece was written into the grid
    PieceLocked,
    /// Full rows were removed (count is 1-4 for normal play)
    LinesCleared(u8),
    /// Spawn failed; the session is over
    GameOver,
    /// The session was discarded and a new game started
    Restarted,
}
