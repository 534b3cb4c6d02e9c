// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

pub use engine::{
    bumpiness, clear_lines, column_heights, compute_grid_features, count_holes, empty_grid,
    fits_with_overhang, horizontal_bounds, is_valid_position, landing_row, occupancy,
    open_top_columns, place, wells, DropOutcome, Grid, GridFeatures, Kind, LockReport, Piece,
    Player, Seat, Session, SessionConfig, SessionError, Shape, ShapeError, H, MAX_ROTS, W,
};
pub use policy::{
    best_placement, choose_for_difficulty, evaluate, find_best_move, find_easy_move, Difficulty,
    DifficultyPolicy, EasyPolicy, HeuristicPolicy, Move, ParseDifficultyError, Placement, Policy,
    RandomSource, ScriptedSource, SeededSource, WEIGHTS,
};
