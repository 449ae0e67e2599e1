//! Cell storage for generalized N×N grids.
//!
//! Cells live in a single row-major buffer; a coordinate addresses one cell.
//! The grid carries no puzzle logic of its own beyond coordinate-addressed
//! reads and writes.

use crate::sudoku::error::ConfigurationError;

/// The contents of one cell: `0` for empty, otherwise a value in `[1, N]`.
pub type Value = u8;

/// Largest supported grid dimension.
///
/// Cell values range over `[0, N]`, so `N` must fit in [`Value`]; 225 = 15²
/// is the largest perfect square that does.
pub const MAX_SIZE: usize = 225;

/// A `(row, col)` cell address, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Row index, `0..size`.
    pub row: usize,
    /// Column index, `0..size`.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate from row and column indices.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// An N×N cell matrix with its box partitioning metadata.
///
/// `size` must be a perfect square in `1..=`[`MAX_SIZE`]; the box edge
/// `root = √size` is fixed at construction. A fresh grid is entirely empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    root: usize,
    cells: Vec<Value>,
}

impl Grid {
    /// Creates an empty `size`×`size` grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::SizeOutOfRange`] when `size` is zero or
    /// exceeds [`MAX_SIZE`], and [`ConfigurationError::NotPerfectSquare`]
    /// when `size` has no integer square root.
    pub fn new(size: usize) -> Result<Self, ConfigurationError> {
        if size == 0 || size > MAX_SIZE {
            return Err(ConfigurationError::SizeOutOfRange { size });
        }

        let root = size.isqrt();
        if root * root != size {
            return Err(ConfigurationError::NotPerfectSquare { size });
        }

        Ok(Self {
            size,
            root,
            cells: vec![0; size * size],
        })
    }

    /// The grid dimension N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The box edge length √N.
    #[must_use]
    pub const fn root(&self) -> usize {
        self.root
    }

    /// The total number of cells, N².
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size * self.size
    }

    /// The largest legal cell value, equal to the grid dimension.
    #[must_use]
    pub const fn max_value(&self) -> Value {
        self.size as Value
    }

    /// Reads the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..size`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Value {
        self.cells[self.index(row, col)]
    }

    /// Writes `val` to the cell at `(row, col)`. `0` empties the cell.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..size`, or if `val` exceeds
    /// [`Self::max_value`].
    pub fn set(&mut self, row: usize, col: usize, val: Value) {
        assert!(
            val <= self.max_value(),
            "value {val} exceeds grid maximum {}",
            self.max_value()
        );
        let i = self.index(row, col);
        self.cells[i] = val;
    }

    /// All coordinates currently holding `0`, in row-major order.
    ///
    /// The ordering is load-bearing: the solver always attacks the first
    /// entry of this sequence.
    #[must_use]
    pub fn unfilled_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == 0)
            .map(|(i, _)| Coord::new(i / self.size, i % self.size))
            .collect()
    }

    /// Read-only row snapshots, top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.cells.chunks(self.size)
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell coordinate out of bounds"
        );
        row * self.size + col
    }
}
