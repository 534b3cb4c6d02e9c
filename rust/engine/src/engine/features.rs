// rust/engine/src/engine/features.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{Grid, H, W};

/// Board metrics consumed by the evaluator and by rollout statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GridFeatures {
    pub heights: [u32; W],
    pub agg_h: u32,
    pub max_h: u32,
    pub min_h: u32,
    pub holes: u32,
    pub bump: u32,
    pub wells: u32,
    pub open_top: u32,
}

impl GridFeatures {
    #[inline]
    pub fn height_diff(&self) -> u32 {
        self.max_h - self.min_h
    }

    #[inline]
    pub fn avg_h(&self) -> f64 {
        self.agg_h as f64 / W as f64
    }
}

/// Compute every metric in one pass over the heights.
/// Complexity: O(H*W), no allocations.
pub fn compute_grid_features(grid: &Grid) -> GridFeatures {
    let heights = column_heights(grid);

    let mut agg_h = 0u32;
    let mut max_h = 0u32;
    let mut min_h = u32::MAX;
    for &h in &heights {
        agg_h += h;
        max_h = max_h.max(h);
        min_h = min_h.min(h);
    }

    GridFeatures {
        heights,
        agg_h,
        max_h,
        min_h,
        holes: count_holes(grid, &heights),
        bump: bumpiness(&heights),
        wells: wells(&heights),
        open_top: open_top_columns(&heights),
    }
}

/// Height of a column: `H - r` for its topmost occupied row `r`, or 0 when empty.
pub fn column_heights(grid: &Grid) -> [u32; W] {
    let mut h = [0u32; W];
    for c in 0..W {
        for r in 0..H {
            if grid[r][c] != 0 {
                h[c] = (H - r) as u32;
                break;
            }
        }
    }
    h
}

/// Empty cells below the topmost occupied cell of their column.
pub fn count_holes(grid: &Grid, heights: &[u32; W]) -> u32 {
    let mut holes = 0u32;
    for c in 0..W {
        let col_h = heights[c] as usize;
        if col_h == 0 {
            continue;
        }
        for r in (H - col_h)..H {
            if grid[r][c] == 0 {
                holes += 1;
            }
        }
    }
    holes
}

pub fn bumpiness(heights: &[u32; W]) -> u32 {
    let mut b = 0u32;
    for i in 0..(W - 1) {
        b += heights[i].abs_diff(heights[i + 1]);
    }
    b
}

/// Sum of well depths. A column is a well by `min(left, right) - own` when positive;
/// the two edge columns only compare against their inner neighbour.
pub fn wells(heights: &[u32; W]) -> u32 {
    let mut total = 0u32;
    for c in 0..W {
        let left = if c == 0 { None } else { Some(heights[c - 1]) };
        let right = heights.get(c + 1).copied();
        let rim = match (left, right) {
            (Some(l), Some(r)) => l.min(r),
            (Some(l), None) => l,
            (None, Some(r)) => r,
            (None, None) => continue,
        };
        total += rim.saturating_sub(heights[c]);
    }
    total
}

/// Columns at least two cells below the average height.
pub fn open_top_columns(heights: &[u32; W]) -> u32 {
    let avg = heights.iter().sum::<u32>() as f64 / W as f64;
    heights.iter().filter(|&&h| h as f64 <= avg - 2.0).count() as u32
}
