// rust/engine/src/policy/easy.rs
#![forbid(unsafe_code)]

use crate::engine::{Grid, Shape, MAX_ROTS};
use crate::policy::base::{Move, Policy};
use crate::policy::random::RandomSource;

/// Samples drawn per rotation.
pub const EASY_SAMPLES_PER_ROT: usize = 3;

/// Offsets are drawn from `0..EASY_OFFSET_SPAN`, independent of piece width.
pub const EASY_OFFSET_SPAN: u32 = 7;

/// Deliberately weak move: random offsets with random scores, best random score wins.
///
/// Nothing here looks at `grid`. The result can collide with settled cells or reach past
/// the right wall for wide pieces; the caller must re-validate before applying it
/// (`Session::apply_move` does).
pub fn find_easy_move<R: RandomSource + ?Sized>(_shape: &Shape, _grid: &Grid, rng: &mut R) -> Move {
    let mut best: Option<(Move, f64)> = None;

    for rotations in 0..MAX_ROTS {
        for _ in 0..EASY_SAMPLES_PER_ROT {
            let offset = rng.below(EASY_OFFSET_SPAN);
            let score = rng.next_unit();
            match best {
                Some((_, bs)) if score <= bs => {}
                _ => best = Some((Move::new(offset, rotations), score)),
            }
        }
    }

    best.map(|(mv, _)| mv).unwrap_or_default()
}

pub struct EasyPolicy<R: RandomSource> {
    rng: R,
}

impl<R: RandomSource> EasyPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> Policy for EasyPolicy<R> {
    fn choose_move(&mut self, shape: &Shape, grid: &Grid) -> Move {
        find_easy_move(shape, grid, &mut self.rng)
    }
}
