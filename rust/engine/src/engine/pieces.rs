// rust/engine/src/engine/pieces.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{MAX_SHAPE_DIM, SPAWN_X};
use crate::engine::shape::Shape;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
    /// 5x5 "funny" piece handed out at score milestones.
    Heart,
}

impl Kind {
    /// The seven regular tetrominoes (the heart is never drawn uniformly).
    pub fn standard() -> &'static [Kind] {
        use Kind::*;
        &[I, O, T, S, Z, J, L]
    }

    /// Easy pieces given to a player after the opponent clears two lines.
    pub fn gifts() -> &'static [Kind] {
        &[Kind::I, Kind::O]
    }

    /// Strict 1..=8 id used for grid cell encoding (0 = empty).
    pub fn idx(self) -> u8 {
        use Kind::*;
        match self {
            I => 1,
            O => 2,
            T => 3,
            S => 4,
            Z => 5,
            J => 6,
            L => 7,
            Heart => 8,
        }
    }

    /// Inverse of `idx()`. Returns None for invalid ids.
    pub fn from_idx(idx: u8) -> Option<Self> {
        use Kind::*;
        match idx {
            1 => Some(I),
            2 => Some(O),
            3 => Some(T),
            4 => Some(S),
            5 => Some(Z),
            6 => Some(J),
            7 => Some(L),
            8 => Some(Heart),
            _ => None,
        }
    }

    pub fn glyph(self) -> char {
        use Kind::*;
        match self {
            I => 'I',
            O => 'O',
            T => 'T',
            S => 'S',
            Z => 'Z',
            J => 'J',
            L => 'L',
            Heart => 'H',
        }
    }

    #[inline]
    pub fn is_special(self) -> bool {
        matches!(self, Kind::Heart)
    }

    /// Spawn orientation.
    pub fn shape(self) -> Shape {
        use Kind::*;
        match self {
            I => SHAPE_I,
            O => SHAPE_O,
            T => SHAPE_T,
            S => SHAPE_S,
            Z => SHAPE_Z,
            J => SHAPE_J,
            L => SHAPE_L,
            Heart => SHAPE_HEART,
        }
    }
}

const fn pad<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Shape {
    let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
    let mut y = 0;
    while y < R {
        let mut x = 0;
        while x < C {
            cells[y][x] = rows[y][x];
            x += 1;
        }
        y += 1;
    }
    Shape::from_padded(R as u8, C as u8, cells)
}

const SHAPE_I: Shape = pad([[1, 1, 1, 1]]);
const SHAPE_O: Shape = pad([[1, 1], [1, 1]]);
const SHAPE_T: Shape = pad([[0, 1, 0], [1, 1, 1]]);
const SHAPE_S: Shape = pad([[0, 1, 1], [1, 1, 0]]);
const SHAPE_Z: Shape = pad([[1, 1, 0], [0, 1, 1]]);
const SHAPE_J: Shape = pad([[1, 0, 0], [1, 1, 1]]);
const SHAPE_L: Shape = pad([[0, 0, 1], [1, 1, 1]]);
const SHAPE_HEART: Shape = pad([
    [0, 1, 0, 1, 0],
    [1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1],
    [0, 1, 1, 1, 0],
    [0, 0, 1, 0, 0],
]);

/// A live piece: current orientation plus top-left anchor in grid coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Piece {
    pub kind: Kind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    pub fn spawn(kind: Kind) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x: SPAWN_X,
            y: 0,
        }
    }
}
