// rust/engine/src/policy/difficulty.rs
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::engine::{Grid, Shape};
use crate::policy::base::{Move, Policy};
use crate::policy::easy::find_easy_move;
use crate::policy::heuristic::find_best_move;
use crate::policy::random::RandomSource;

/// Chance that a medium AI nudges its best offset.
pub const MEDIUM_BLUNDER_PROB: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown difficulty {0:?} (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl Difficulty {
    /// Pause between AI decisions in a real-time game loop.
    pub fn move_delay(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(2000),
            Difficulty::Medium => Duration::from_millis(1000),
            Difficulty::Hard => Duration::from_millis(500),
        }
    }
}

/// One AI decision at `difficulty`.
///
/// - easy: `find_easy_move`
/// - medium: `find_best_move`, then with probability 0.3 the offset moves by -1, 0 or +1
/// - hard: `find_best_move`
///
/// Easy and medium results are not re-validated against `grid`.
pub fn choose_for_difficulty<R: RandomSource + ?Sized>(
    difficulty: Difficulty,
    shape: &Shape,
    grid: &Grid,
    rng: &mut R,
) -> Move {
    match difficulty {
        Difficulty::Easy => find_easy_move(shape, grid, rng),
        Difficulty::Medium => {
            let mut mv = find_best_move(shape, grid);
            if rng.next_unit() < MEDIUM_BLUNDER_PROB {
                mv.offset += rng.below(3) - 1;
            }
            mv
        }
        Difficulty::Hard => find_best_move(shape, grid),
    }
}

pub struct DifficultyPolicy<R: RandomSource> {
    difficulty: Difficulty,
    rng: R,
}

impl<R: RandomSource> DifficultyPolicy<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        Self { difficulty, rng }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

impl<R: RandomSource> Policy for DifficultyPolicy<R> {
    fn choose_move(&mut self, shape: &Shape, grid: &Grid) -> Move {
        choose_for_difficulty(self.difficulty, shape, grid, &mut self.rng)
    }
}
