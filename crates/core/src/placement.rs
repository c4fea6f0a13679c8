//! Placement module - collision, movement, hard-drop and lock
//!
//! Every function here is pure: it reads a grid and a piece and returns a new
//! piece or a new grid. Cells above the top row (`y < 0`) are a spawn/rotation
//! buffer and never collide.

use crate::grid::Grid;
use crate::shapes::{color, shape_offsets, PieceShape};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, ROTATION_COUNT, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    /// Rotation index, always in `0..4`
    pub rotation: u8,
}

impl ActivePiece {
    /// Create a piece at an explicit origin and rotation
    ///
    /// # Panics
    ///
    /// Panics if `rotation` is not in `0..4`.
    pub fn new(kind: PieceKind, x: i8, y: i8, rotation: u8) -> Self {
        assert!(
            rotation < ROTATION_COUNT,
            "rotation index {} out of range",
            rotation
        );
        Self {
            kind,
            x,
            y,
            rotation,
        }
    }

    /// Create a new piece at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y, 0)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        shape_offsets(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four minos
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Apply a position and rotation delta without any legality check
    pub fn shifted(&self, dx: i8, dy: i8, drot: i8) -> Self {
        let rotation = (self.rotation as i8 + drot).rem_euclid(ROTATION_COUNT as i8) as u8;
        Self {
            x: self.x + dx,
            y: self.y + dy,
            rotation,
            ..*self
        }
    }
}

/// Check whether every mino is inside the walls, above the floor and not on a filled cell
pub fn is_legal(grid: &Grid, piece: &ActivePiece) -> bool {
    piece.cells().iter().all(|&(x, y)| {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !grid.is_filled(x, y)
    })
}

/// Move and/or rotate a piece, returning the result only if it is legal
///
/// No wall kicks: a blocked rotation is simply rejected.
pub fn try_move(grid: &Grid, piece: &ActivePiece, dx: i8, dy: i8, drot: i8) -> Option<ActivePiece> {
    let moved = piece.shifted(dx, dy, drot);
    is_legal(grid, &moved).then_some(moved)
}

/// Deepest legal position straight below the piece (ghost and hard drop)
pub fn hard_drop_target(grid: &Grid, piece: &ActivePiece) -> ActivePiece {
    let mut target = *piece;
    while let Some(lower) = try_move(grid, &target, 0, 1, 0) {
        target = lower;
    }
    target
}

/// Write the piece into a copy of the grid
///
/// Minos above the top row are dropped; the input grid is left untouched.
pub fn lock(grid: &Grid, piece: &ActivePiece) -> Grid {
    let mut locked = *grid;
    let cell = Cell::Filled {
        kind: piece.kind,
        color: color(piece.kind),
    };
    for (x, y) in piece.cells() {
        if y >= 0 && y < BOARD_HEIGHT as i8 {
            locked.set(x, y, cell);
        }
    }
    locked
}
