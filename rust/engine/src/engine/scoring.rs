// rust/engine/src/engine/scoring.rs
#![forbid(unsafe_code)]

use crate::engine::constants::Grid;
use crate::engine::pieces::Kind;

/// Extra points for a clear while heart cells remain on the board.
pub const SPECIAL_BONUS: u64 = 100;

/// Lines cleared in one lock that earn the opponent a gift piece.
pub const GIFT_LINES: u32 = 2;

/// 50 per line plus a bonus for multi-line clears.
pub fn line_clear_points(cleared_lines: u32) -> u64 {
    match cleared_lines {
        1 => 50,
        2 => 100 + 50 * 2,
        3 => 200 + 50 * 3,
        4 => 300 + 50 * 4,
        _ => 0,
    }
}

/// Cells whose code decodes to a special kind. Unknown codes are not special.
pub fn count_special_cells(grid: &Grid) -> u32 {
    grid.iter()
        .flat_map(|row| row.iter())
        .filter(|&&v| Kind::from_idx(v).is_some_and(Kind::is_special))
        .count() as u32
}

/// Points for one lock. `grid_after_clear` is the board once full rows are gone.
pub fn lock_points(cleared_lines: u32, grid_after_clear: &Grid) -> u64 {
    if cleared_lines == 0 {
        return 0;
    }
    let mut points = line_clear_points(cleared_lines);
    if count_special_cells(grid_after_clear) > 0 {
        points += SPECIAL_BONUS;
    }
    points
}
