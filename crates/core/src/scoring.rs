//! Scoring module - full-row detection, row removal, score and level rules
//!
//! Clearing is split from locking: `find_full_rows` marks rows on the
//! post-lock grid, and `clear_rows` removes them later once the host's flash
//! delay has elapsed.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Cell, BOARD_HEIGHT, LEVEL_SPEED_MS, LINES_PER_LEVEL, LINE_SCORES};

/// Row indices in ascending order
pub type RowSet = ArrayVec<u8, { BOARD_HEIGHT as usize }>;

/// Indices of every completely filled row, top to bottom
pub fn find_full_rows(grid: &Grid) -> RowSet {
    (0..BOARD_HEIGHT)
        .filter(|&y| grid.is_row_full(y as usize))
        .collect()
}

/// Remove the given rows and pad the top with empty rows
///
/// Remaining rows keep their relative order; the result is always
/// `BOARD_HEIGHT` rows tall. Clearing no rows returns an identical grid.
///
/// # Panics
///
/// Panics if any index is not a valid row.
pub fn clear_rows(grid: &Grid, rows: &[u8]) -> Grid {
    assert!(
        rows.iter().all(|&y| y < BOARD_HEIGHT),
        "row index out of range in {:?}",
        rows
    );
    if rows.is_empty() {
        return *grid;
    }

    let mut cleared = Grid::new();
    let mut write_y = BOARD_HEIGHT as i8 - 1;

    // Scan from bottom to top, copying surviving rows down.
    for read_y in (0..BOARD_HEIGHT).rev() {
        if rows.contains(&read_y) {
            continue;
        }
        for (x, cell) in grid.row(read_y as usize).iter().enumerate() {
            if *cell != Cell::Empty {
                cleared.set(x as i8, write_y, *cell);
            }
        }
        write_y -= 1;
    }

    cleared
}

/// Points for clearing `rows_cleared` rows with one lock at `level`
///
/// # Panics
///
/// Panics if more than four rows are reported, which a single lock cannot produce.
pub fn score_delta(rows_cleared: usize, level: u32) -> u32 {
    assert!(
        rows_cleared < LINE_SCORES.len(),
        "a single lock cannot clear {} rows",
        rows_cleared
    );
    LINE_SCORES[rows_cleared] * (level + 1)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn level_for(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Gravity period for a level, clamped at the last table entry
pub fn level_speed_ms(level: u32) -> u32 {
    let idx = (level as usize).min(LEVEL_SPEED_MS.len() - 1);
    LEVEL_SPEED_MS[idx]
}
