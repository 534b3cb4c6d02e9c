// rust/engine/src/policy/heuristic.rs
#![forbid(unsafe_code)]

use crate::engine::{
    clear_lines, compute_grid_features, horizontal_bounds, landing_row, occupancy, place, Grid,
    GridFeatures, Shape, MAX_ROTS,
};
use crate::policy::base::{Move, Policy};

/// Coefficients of the board evaluation. Negative terms are penalties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub agg_height: f64,
    pub lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
    pub wells: f64,
    pub open_top: f64,
    pub height_diff: f64,
}

/// The one weight table. Never derived from game state.
pub const WEIGHTS: Weights = Weights {
    agg_height: -0.510066,
    lines: 0.760666,
    holes: -0.35663,
    bumpiness: -0.184483,
    wells: -0.18,
    open_top: 0.2,
    height_diff: -0.2,
};

impl Weights {
    pub fn score(&self, f: &GridFeatures, cleared_lines: u32) -> f64 {
        self.agg_height * f64::from(f.agg_h)
            + self.lines * f64::from(cleared_lines)
            + self.holes * f64::from(f.holes)
            + self.bumpiness * f64::from(f.bump)
            + self.wells * f64::from(f.wells)
            + self.open_top * f64::from(f.open_top)
            + self.height_diff * f64::from(f.height_diff())
    }
}

/// Score of a post-clear board's features with `WEIGHTS`.
#[inline]
pub fn evaluate(features: &GridFeatures, cleared_lines: u32) -> f64 {
    WEIGHTS.score(features, cleared_lines)
}

/// Winning candidate of the exhaustive search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub mv: Move,
    pub landing_row: i32,
    pub cleared_lines: u32,
    pub score: f64,
}

/// Exhaustive one-piece search. `None` when no rotation/offset lands anywhere.
///
/// Order: rotations 0..4, offsets ascending inside `horizontal_bounds`. Only a strictly
/// greater score replaces the incumbent, so ties keep the lowest rotation, then the
/// lowest offset.
pub fn best_placement(shape: &Shape, grid: &Grid) -> Option<Placement> {
    let board = occupancy(grid);
    let mut best: Option<Placement> = None;

    for rotations in 0..MAX_ROTS {
        let turned = shape.rotated(rotations);
        let (min_x, max_x) = horizontal_bounds(&turned);

        for x in min_x..=max_x {
            let Some(y) = landing_row(&board, &turned, x) else {
                continue;
            };
            let locked = place(&board, &turned, x, y, 1);
            let (cleared, cleared_lines) = clear_lines(&locked);
            let score = evaluate(&compute_grid_features(&cleared), cleared_lines);

            match best {
                Some(b) if score <= b.score => {}
                _ => {
                    best = Some(Placement {
                        mv: Move::new(x, rotations),
                        landing_row: y,
                        cleared_lines,
                        score,
                    })
                }
            }
        }
    }

    best
}

/// Best move for `shape` on `grid`, or `Move::default()` when nothing fits.
///
/// The default is indistinguishable from a real (0, 0) answer; game-over detection stays
/// with the caller.
pub fn find_best_move(shape: &Shape, grid: &Grid) -> Move {
    best_placement(shape, grid)
        .map(|p| p.mv)
        .unwrap_or_default()
}

/// Deterministic policy: always the unperturbed best move.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_move(&mut self, shape: &Shape, grid: &Grid) -> Move {
        find_best_move(shape, grid)
    }
}
