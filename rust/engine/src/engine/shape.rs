// rust/engine/src/engine/shape.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::engine::constants::MAX_SHAPE_DIM;

/// Reasons a piece matrix is rejected at the boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ShapeError {
    #[error("shape has no rows or no columns")]
    Empty,
    #[error("shape row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("shape is {rows}x{cols}, larger than the {max}x{max} limit", max = MAX_SHAPE_DIM)]
    TooLarge { rows: usize, cols: usize },
}

/// Rectangular 0/1 piece matrix, stored inline so copies are cheap.
///
/// Cells outside `rows x cols` are always zero, which keeps the derived
/// equality structural.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from row slices. Any non-zero input cell counts as filled.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let n = rows.len();
        let m = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if n == 0 || m == 0 {
            return Err(ShapeError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            let found = row.as_ref().len();
            if found != m {
                return Err(ShapeError::Ragged {
                    row: i,
                    expected: m,
                    found,
                });
            }
        }
        if n > MAX_SHAPE_DIM || m > MAX_SHAPE_DIM {
            return Err(ShapeError::TooLarge { rows: n, cols: m });
        }

        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.as_ref().iter().enumerate() {
                cells[y][x] = u8::from(v != 0);
            }
        }
        Ok(Self {
            rows: n as u8,
            cols: m as u8,
            cells,
        })
    }

    /// Table constructor for the built-in pieces. `cells` must already be 0/1 and zero-padded.
    pub(crate) const fn from_padded(
        rows: u8,
        cols: u8,
        cells: [[u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
    ) -> Self {
        Self { rows, cols, cells }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    #[inline]
    pub fn is_filled(&self, y: usize, x: usize) -> bool {
        y < self.rows() && x < self.cols() && self.cells[y][x] != 0
    }

    /// Filled cells as (dx, dy) offsets from the top-left anchor, row-major.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows()).flat_map(move |y| {
            (0..self.cols())
                .filter(move |&x| self.cells[y][x] != 0)
                .map(move |x| (x as i32, y as i32))
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows())
            .map(|y| self.cells[y][..self.cols()].to_vec())
            .collect()
    }

    /// Quarter turn clockwise: an N x M shape becomes M x N with
    /// `out[x][N-1-y] = in[y][x]`.
    pub fn rotate_cw(&self) -> Self {
        let n = self.rows();
        let m = self.cols();
        let mut cells = [[0u8; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for y in 0..n {
            for x in 0..m {
                cells[x][n - 1 - y] = self.cells[y][x];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Applies `rotate_cw` exactly `times` times.
    pub fn rotated(&self, times: u8) -> Self {
        let mut s = *self;
        for _ in 0..times {
            s = s.rotate_cw();
        }
        s
    }
}
