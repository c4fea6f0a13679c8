//! Shapes module - piece rotation tables and display colors
//!
//! Every kind has four rotation states of four `(dx, dy)` offsets relative to
//! the piece origin. Rotation is a plain table lookup: there is no wall-kick
//! search, and the O piece repeats the same state four times.

use crate::types::{Color, PieceKind, ROTATION_COUNT};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Rotation states of one kind, indexed by rotation 0..=3
pub type RotationTable = [PieceShape; ROTATION_COUNT as usize];

const I_SHAPES: RotationTable = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_SHAPES: RotationTable = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: RotationTable = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const O_SHAPES: RotationTable = [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4];

const S_SHAPES: RotationTable = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const T_SHAPES: RotationTable = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: RotationTable = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (2, 1), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

/// All four rotation states for a kind
pub fn rotations(kind: PieceKind) -> &'static RotationTable {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation index
///
/// # Panics
///
/// Panics if `rotation` is not in `0..4`.
pub fn shape_offsets(kind: PieceKind, rotation: u8) -> PieceShape {
    assert!(
        rotation < ROTATION_COUNT,
        "rotation index {} out of range for {:?}",
        rotation,
        kind
    );
    rotations(kind)[rotation as usize]
}

/// Display color shared by every rotation of a kind
pub fn color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::from_hex(0x2563EB),
        PieceKind::J => Color::from_hex(0xF59E0B),
        PieceKind::L => Color::from_hex(0xEF4444),
        PieceKind::O => Color::from_hex(0x22D3EE),
        PieceKind::S => Color::from_hex(0x38BDF8),
        PieceKind::T => Color::from_hex(0x6366F1),
        PieceKind::Z => Color::from_hex(0x111827),
    }
}
