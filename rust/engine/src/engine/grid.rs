// rust/engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{empty_grid, Grid, H, W};
use crate::engine::shape::Shape;

/// Inclusive range of anchor columns worth trying for `shape`.
///
/// Width-based only: `min = -floor((w-1)/2)`, `max = W - ceil(w/2)`.
/// Offsets inside the range still have to pass `is_valid_position`.
#[inline]
pub fn horizontal_bounds(shape: &Shape) -> (i32, i32) {
    let w = shape.cols() as i32;
    let min_x = -((w - 1) / 2);
    let max_x = W as i32 - (w + 1) / 2;
    (min_x, max_x)
}

/// True iff every filled cell anchored at (x, y) is on the board and on an empty cell.
pub fn is_valid_position(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    for (dx, dy) in shape.filled_cells() {
        let gx = x + dx;
        let gy = y + dy;
        if gx < 0 || gx >= W as i32 || gy < 0 || gy >= H as i32 {
            return false;
        }
        if grid[gy as usize][gx as usize] != 0 {
            return false;
        }
    }
    true
}

/// Like `is_valid_position`, but cells above row 0 are accepted.
/// Movement of a live piece uses this; it may poke out of the top while spawning.
pub fn fits_with_overhang(grid: &Grid, shape: &Shape, x: i32, y: i32) -> bool {
    for (dx, dy) in shape.filled_cells() {
        let gx = x + dx;
        let gy = y + dy;
        if gx < 0 || gx >= W as i32 || gy >= H as i32 {
            return false;
        }
        if gy >= 0 && grid[gy as usize][gx as usize] != 0 {
            return false;
        }
    }
    true
}

/// Gravity drop from row 0. Returns the last valid row, or `None` when row 0 is already blocked
/// (or the column range is off the board).
pub fn landing_row(grid: &Grid, shape: &Shape, x: i32) -> Option<i32> {
    let mut y: i32 = 0;
    while y < H as i32 && is_valid_position(grid, shape, x, y) {
        y += 1;
    }
    if y == 0 { None } else { Some(y - 1) }
}

/// Returns a copy of `grid` with the piece written at (x, y) using `fill` as cell value.
/// Cells above the board or outside the columns are skipped.
pub fn place(grid: &Grid, shape: &Shape, x: i32, y: i32, fill: u8) -> Grid {
    let mut out = *grid;
    for (dx, dy) in shape.filled_cells() {
        let gx = x + dx;
        let gy = y + dy;
        if gx < 0 || gx >= W as i32 || gy < 0 || gy >= H as i32 {
            continue;
        }
        out[gy as usize][gx as usize] = fill;
    }
    out
}

#[inline]
pub fn row_is_full(row: &[u8; W]) -> bool {
    row.iter().all(|&c| c != 0)
}

/// Removes every full row; survivors keep their order and sink to the bottom,
/// empty rows refill the top. Returns (new_grid, cleared_rows).
pub fn clear_lines(grid: &Grid) -> (Grid, u32) {
    let mut cleared = 0u32;
    let mut out = empty_grid();
    let mut write_row: i32 = (H as i32) - 1;

    for r in (0..H).rev() {
        if row_is_full(&grid[r]) {
            cleared += 1;
            continue;
        }
        out[write_row as usize] = grid[r];
        write_row -= 1;
    }

    (out, cleared)
}

/// Board as ASCII, '#' for occupied cells.
pub fn render_ascii(grid: &Grid) -> String {
    let mut s = String::with_capacity((W + 3) * (H + 2));
    s.push_str("+----------+\n");
    for row in grid.iter() {
        s.push('|');
        for &v in row.iter() {
            s.push(if v == 0 { ' ' } else { '#' });
        }
        s.push_str("|\n");
    }
    s.push_str("+----------+\n");
    s
}
