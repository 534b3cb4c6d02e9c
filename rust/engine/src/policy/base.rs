// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Grid, Shape};

/// A placement decision: quarter turns clockwise, then the anchor column.
///
/// `Move::default()` (offset 0, no rotation) doubles as the "nothing fits" answer of the
/// best-move search, so callers must check legality themselves.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Move {
    pub offset: i32,
    pub rotations: u8,
}

impl Move {
    pub fn new(offset: i32, rotations: u8) -> Self {
        Self { offset, rotations }
    }
}

/// Policy chooses a placement for a piece on a board.
///
/// Inputs are borrowed snapshots; implementations work on their own copies.
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_move(&mut self, shape: &Shape, grid: &Grid) -> Move;
}
