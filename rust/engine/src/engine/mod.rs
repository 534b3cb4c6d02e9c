// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod constants;
mod features;
mod game;
mod grid;
mod piece_rule;
mod pieces;
mod scoring;
mod shape;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use constants::{empty_grid, occupancy, Grid, H, MAX_ROTS, MAX_SHAPE_DIM, SPAWN_X, W};
pub use features::{
    bumpiness, column_heights, compute_grid_features, count_holes, open_top_columns, wells,
    GridFeatures,
};
pub use game::{DropOutcome, LockReport, Player, Seat, Session, SessionConfig, SessionError};
pub use grid::{
    clear_lines, fits_with_overhang, horizontal_bounds, is_valid_position, landing_row, place,
    render_ascii, row_is_full,
};
pub use piece_rule::{heart_due, DrawContext, PieceRule, HEART_EVERY, HEART_WINDOW};
pub use pieces::{Kind, Piece};
pub use scoring::{count_special_cells, line_clear_points, lock_points, GIFT_LINES, SPECIAL_BONUS};
pub use shape::{Shape, ShapeError};
