//! Driver module - host-side timers for gravity and the clear delay
//!
//! The engine never reads a clock. The host feeds elapsed milliseconds into a
//! [`Driver`], which fires `gravity_tick` every `level_speed_ms(level)` while a
//! piece is falling and `complete_clear` once `LINE_CLEAR_DELAY_MS` has passed
//! in `Clearing`. Every newly spawned piece starts with a full gravity
//! period. Tests drive it with explicit values.

use crate::session::{Phase, Session};
use crate::types::LINE_CLEAR_DELAY_MS;

/// Gravity and clear-delay accumulators for one session
#[derive(Debug, Clone, Default)]
pub struct Driver {
    gravity_ms: u32,
    clear_ms: u32,
    episode_id: u32,
    pieces_spawned: u32,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop both accumulators
    pub fn reset(&mut self) {
        self.gravity_ms = 0;
        self.clear_ms = 0;
    }

    /// Milliseconds accumulated toward the next gravity step
    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    /// Milliseconds spent in the current clear window
    pub fn clear_ms(&self) -> u32 {
        self.clear_ms
    }

    /// Advance timers by `elapsed_ms` and fire whatever came due
    ///
    /// Nothing accumulates while paused or after game over. Returns whether
    /// the session changed.
    pub fn advance(&mut self, session: &mut Session, elapsed_ms: u32) -> bool {
        if session.episode_id() != self.episode_id {
            self.episode_id = session.episode_id();
            self.reset();
        }
        self.sync_piece(session);
        if session.paused() {
            return false;
        }

        match session.phase() {
            Phase::GameOver => {
                self.reset();
                false
            }
            Phase::Clearing => {
                self.gravity_ms = 0;
                self.clear_ms = self.clear_ms.saturating_add(elapsed_ms);
                if self.clear_ms < LINE_CLEAR_DELAY_MS {
                    return false;
                }
                self.clear_ms = 0;
                session.complete_clear()
            }
            Phase::Falling => {
                self.clear_ms = 0;
                self.gravity_ms = self.gravity_ms.saturating_add(elapsed_ms);

                let mut changed = false;
                // A long frame can cover several gravity periods.
                while session.phase() == Phase::Falling
                    && self.gravity_ms >= session.gravity_period_ms()
                {
                    self.gravity_ms -= session.gravity_period_ms();
                    changed |= session.gravity_tick();
                    self.sync_piece(session);
                }
                changed
            }
        }
    }

    /// Zero the gravity accumulator when a new piece has spawned since the last look.
    fn sync_piece(&mut self, session: &Session) {
        if session.pieces_spawned() != self.pieces_spawned {
            self.pieces_spawned = session.pieces_spawned();
            self.gravity_ms = 0;
        }
    }
}
