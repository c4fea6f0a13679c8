use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::placement::ActivePiece;
use crate::scoring::RowSet;
use crate::session::Phase;
use crate::types::{PieceKind, PREVIEW_LEN};

/// Read-only view of a session for one rendered frame
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub active: Option<ActivePiece>,
    /// Landing position of `active`, only when strictly below it
    pub ghost: Option<ActivePiece>,
    /// Rows flashing before removal (non-empty only while clearing)
    pub pending_clear_rows: RowSet,
    pub next_kind: PieceKind,
    pub upcoming: ArrayVec<PieceKind, PREVIEW_LEN>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub phase: Phase,
    pub episode_id: u32,
}

impl SessionSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        !self.game_over() && !self.paused
    }

    pub fn is_pending_clear(&self, y: u8) -> bool {
        self.pending_clear_rows.contains(&y)
    }

    /// Absolute cells of the active piece
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    /// Absolute cells of the ghost piece
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        self.ghost.map(|p| p.cells())
    }
}
