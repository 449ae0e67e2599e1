//! Typed failures for grid construction and puzzle generation.

use crate::sudoku::grid::MAX_SIZE;
use thiserror::Error;

/// Rejections raised before any grid mutation takes place.
///
/// Construction and occlusion validate their inputs up front; when one of
/// these is returned, the grid involved is guaranteed untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The requested grid dimension has no integer square root, so the grid
    /// cannot be partitioned into boxes.
    #[error("grid size {size} is not a perfect square")]
    NotPerfectSquare {
        /// The rejected dimension.
        size: usize,
    },

    /// The requested grid dimension falls outside the supported range.
    #[error("grid size {size} is outside the supported range 1..={max}", max = MAX_SIZE)]
    SizeOutOfRange {
        /// The rejected dimension.
        size: usize,
    },

    /// More cells were asked to be hidden than the grid contains.
    #[error("cannot hide {requested} cells in a grid of {cells}")]
    HiddenCountOutOfRange {
        /// The number of cells requested to be hidden.
        requested: usize,
        /// The total number of cells in the grid.
        cells: usize,
    },
}

/// The solver exhausted every candidate at the top of its search.
///
/// Returned both for grids whose givens already conflict and for consistent
/// partial grids that admit no completion. The grid is rolled back to its
/// input state in either case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no complete assignment exists from the grid's current state")]
pub struct Unsolvable;
