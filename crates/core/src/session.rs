//! Session module - the game state machine
//!
//! This module ties together all core components: grid, shapes, supply,
//! placement and scoring. A session moves through
//! `Falling -> (Clearing ->) Falling` one piece at a time and ends in
//! `GameOver` when a spawn is blocked. `paused` is a flag on top of the phase.
//!
//! Line clears are two-phase: locking a piece that completes rows only marks
//! them in `pending_clear_rows`. The rows stay on the grid, with no active
//! piece, until the host calls [`Session::complete_clear`] after its flash
//! delay (see [`crate::driver::Driver`]).

use crate::grid::Grid;
use crate::placement::{hard_drop_target, is_legal, lock, try_move, ActivePiece};
use crate::rng::PieceSupply;
use crate::scoring::{clear_rows, find_full_rows, level_for, level_speed_ms, score_delta, RowSet};
use crate::snapshot::SessionSnapshot;
use crate::types::*;

use arrayvec::ArrayVec;

/// Explicit state of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// An active piece is falling
    Falling,
    /// Full rows are marked and waiting for removal; there is no active piece
    Clearing,
    /// A spawn was blocked; only a restart leaves this phase
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    active: Option<ActivePiece>,
    next_kind: PieceKind,
    supply: PieceSupply,
    phase: Phase,
    pending_clear_rows: RowSet,
    score: u32,
    level: u32,
    lines: u32,
    paused: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Number of pieces spawned this episode.
    pieces_spawned: u32,
    /// Pending notifications for the host, oldest first.
    events: Vec<GameEvent>,
}

impl Session {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::start(seed, Grid::new(), 0)
    }

    /// Create a new game on a pre-filled grid
    ///
    /// If the first spawn is blocked the session starts in `GameOver`.
    pub fn with_grid(seed: u32, grid: Grid) -> Self {
        Self::start(seed, grid, 0)
    }

    fn start(seed: u32, grid: Grid, episode_id: u32) -> Self {
        let mut supply = PieceSupply::new(seed);
        let next_kind = supply.draw();
        let mut session = Self {
            grid,
            active: None,
            next_kind,
            supply,
            phase: Phase::Falling,
            pending_clear_rows: RowSet::new(),
            score: 0,
            level: 0,
            lines: 0,
            paused: false,
            episode_id,
            pieces_spawned: 0,
            events: Vec::with_capacity(8),
        };
        if episode_id > 0 {
            session.events.push(GameEvent::Restarted);
        }
        session.spawn();
        session
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    /// Kinds queued after `next_kind`, in draw order
    pub fn upcoming(&self) -> ArrayVec<PieceKind, PREVIEW_LEN> {
        self.supply.upcoming()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_clear_rows(&self) -> &[u8] {
        &self.pending_clear_rows
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Current gravity period in milliseconds
    pub fn gravity_period_ms(&self) -> u32 {
        level_speed_ms(self.level)
    }

    /// Where the active piece would land, if that is below where it is now
    pub fn ghost(&self) -> Option<ActivePiece> {
        let active = self.active?;
        let target = hard_drop_target(&self.grid, &active);
        (target.y > active.y).then_some(target)
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid,
            active: self.active,
            ghost: self.ghost(),
            pending_clear_rows: self.pending_clear_rows.clone(),
            next_kind: self.next_kind,
            upcoming: self.supply.upcoming(),
            score: self.score,
            level: self.level,
            lines: self.lines,
            paused: self.paused,
            phase: self.phase,
            episode_id: self.episode_id,
        }
    }

    /// Promote `next_kind` to the active piece at the spawn position
    ///
    /// Only runs while `Falling` with no active piece; a live piece, a
    /// pending clear or a finished game is left alone. A blocked spawn ends
    /// the game and leaves grid, supply and `next_kind` untouched. Returns
    /// whether a piece was placed.
    pub fn spawn(&mut self) -> bool {
        if self.active.is_some() || self.phase != Phase::Falling {
            return false;
        }

        let piece = ActivePiece::spawn(self.next_kind);
        if !is_legal(&self.grid, &piece) {
            self.active = None;
            self.phase = Phase::GameOver;
            self.paused = false;
            self.events.push(GameEvent::GameOver);
            return false;
        }

        self.active = Some(piece);
        self.next_kind = self.supply.draw();
        self.phase = Phase::Falling;
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.events.push(GameEvent::Spawned(piece.kind));
        true
    }

    /// Apply a movement request
    ///
    /// Blocked horizontal moves and rotations are ignored. A blocked soft drop
    /// locks the piece. While paused nothing moves; on game over any request
    /// restarts. Returns whether the session changed.
    pub fn request_move(&mut self, direction: Direction) -> bool {
        if self.phase == Phase::GameOver {
            self.restart();
            return true;
        }
        if self.paused {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let (dx, dy, drot) = direction.delta();
        match try_move(&self.grid, &active, dx, dy, drot) {
            Some(moved) => {
                self.active = Some(moved);
                self.events.push(GameEvent::PieceMoved);
                true
            }
            None if direction == Direction::SoftDown => {
                self.lock_and_advance();
                true
            }
            None => false,
        }
    }

    /// Move the active piece to its landing row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            self.restart();
            return true;
        }
        if self.paused {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let target = hard_drop_target(&self.grid, &active);
        if target != active {
            self.events.push(GameEvent::PieceMoved);
        }
        self.active = Some(target);
        self.lock_and_advance();
        true
    }

    /// Lock the active piece, then either spawn or start clearing
    pub fn lock_and_advance(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.grid = lock(&self.grid, &active);
        self.events.push(GameEvent::PieceLocked);

        let full = find_full_rows(&self.grid);
        if full.is_empty() {
            self.spawn();
        } else {
            self.pending_clear_rows = full;
            self.phase = Phase::Clearing;
        }
    }

    /// Remove the pending rows, score them and spawn the next piece
    ///
    /// The clear is scored at the level the piece was played at; the level is
    /// then recomputed from the new line total. Returns false outside `Clearing`.
    pub fn complete_clear(&mut self) -> bool {
        if self.phase != Phase::Clearing {
            return false;
        }

        let count = self.pending_clear_rows.len();
        self.grid = clear_rows(&self.grid, &self.pending_clear_rows);
        self.score = self.score.saturating_add(score_delta(count, self.level));
        self.lines += count as u32;
        self.level = level_for(self.lines);
        self.pending_clear_rows.clear();
        self.events.push(GameEvent::LinesCleared(count as u8));

        self.phase = Phase::Falling;
        self.spawn();
        true
    }

    /// One gravity step: a soft drop that only runs while a piece is falling
    pub fn gravity_tick(&mut self) -> bool {
        if self.phase != Phase::Falling || self.paused {
            return false;
        }
        self.request_move(Direction::SoftDown)
    }

    /// Flip the pause flag (not allowed once the game is over)
    pub fn toggle_pause(&mut self) -> bool {
        if self.phase == Phase::GameOver {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Discard this game and start a fresh one
    pub fn restart(&mut self) {
        let seed = self.supply.next_seed();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::start(seed, Grid::new(), next_episode);
    }

    /// Apply a host intent
    ///
    /// On game over every intent restarts. While paused only `TogglePause`
    /// is honored.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.phase == Phase::GameOver {
            self.restart();
            return true;
        }
        match intent {
            Intent::TogglePause => self.toggle_pause(),
            _ if self.paused => false,
            Intent::Restart => {
                self.restart();
                true
            }
            Intent::HardDrop => self.hard_drop(),
            Intent::MoveLeft | Intent::MoveRight | Intent::SoftDrop | Intent::Rotate => {
                match intent.direction() {
                    Some(direction) => self.request_move(direction),
                    None => false,
                }
            }
        }
    }
}

impl Session {
    /// Replace the active piece (scripted scenarios in tests)
    #[cfg(test)]
    pub(crate) fn set_active(&mut self, piece: ActivePiece) {
        assert!(is_legal(&self.grid, &piece));
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
