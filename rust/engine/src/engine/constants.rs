// rust/engine/src/engine/constants.rs
#![forbid(unsafe_code)]

pub const H: usize = 20;
pub const W: usize = 10;

/// Rotation slots tried by the search (0..MAX_ROTS quarter turns clockwise).
pub const MAX_ROTS: u8 = 4;

/// Largest side of any piece matrix (the 5x5 heart).
pub const MAX_SHAPE_DIM: usize = 5;

/// Anchor column used when a piece enters the board.
pub const SPAWN_X: i32 = 3;

/// Settled cells only. 0 = empty, any other value = occupied.
pub type Grid = [[u8; W]; H];

#[inline]
pub fn empty_grid() -> Grid {
    [[0u8; W]; H]
}

/// Strip cell metadata: every non-zero cell becomes 1.
pub fn occupancy(grid: &Grid) -> Grid {
    let mut out = empty_grid();
    for r in 0..H {
        for c in 0..W {
            out[r][c] = u8::from(grid[r][c] != 0);
        }
    }
    out
}
