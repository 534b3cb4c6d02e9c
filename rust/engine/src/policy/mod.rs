// rust/engine/src/policy/mod.rs
#![forbid(unsafe_code)]

mod base;
mod difficulty;
mod easy;
mod heuristic;
mod random;

/**
 * Curated policy public API.
 *
 * Internal implementation modules remain private; only stable policy entrypoints are re-exported.
 */
pub use base::{Move, Policy};
pub use difficulty::{
    choose_for_difficulty, Difficulty, DifficultyPolicy, ParseDifficultyError, MEDIUM_BLUNDER_PROB,
};
pub use easy::{find_easy_move, EasyPolicy, EASY_OFFSET_SPAN, EASY_SAMPLES_PER_ROT};
pub use heuristic::{
    best_placement, evaluate, find_best_move, HeuristicPolicy, Placement, Weights, WEIGHTS,
};
pub use random::{RandomSource, ScriptedSource, SeededSource};
