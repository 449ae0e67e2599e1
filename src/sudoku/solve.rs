#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Defines the randomized depth-first backtracking solver.
//!
//! This module provides the `Solver` struct, which fills every empty cell of
//! a grid with a value satisfying the row/column/box uniqueness constraints,
//! or reports that no such completion exists from the grid's current state.
//!
//! The core logic is a classical exhaustive DFS with chronological
//! backtracking and no constraint propagation:
//! 1.  **Cell order:** the solver always attacks the first empty cell in
//!     row-major order, so the search tree's structure is deterministic even
//!     though its outcome is not.
//! 2.  **Candidates:** on every arrival at a cell the full candidate list
//!     `[1, N]` is reshuffled into a uniformly random order. This per-cell
//!     reshuffle is the sole source of run-to-run solution variety.
//! 3.  **Placement:** the first shuffled candidate the validator accepts is
//!     tentatively written into the grid and the search advances to the next
//!     empty cell.
//! 4.  **Backtracking:** a cell whose candidates are exhausted is reset to 0
//!     and its frame abandoned; the previous cell resumes with its own
//!     remaining candidates.
//!
//! Recursion depth would be bounded by N², but the search is formulated
//! iteratively over an explicit frame stack so large grids cannot exhaust
//! the call stack. The grid is mutated in place and rolled back on failure;
//! no per-branch copies are made.

use crate::sudoku::error::Unsolvable;
use crate::sudoku::grid::{Coord, Grid, Value};
use crate::sudoku::validate;
use smallvec::SmallVec;

/// Counters describing the most recent [`Solver::solve`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Tentative placements written into the grid.
    pub placements: usize,
    /// Candidates tested against the validator.
    pub candidates: usize,
    /// Frames abandoned after exhausting their candidate lists.
    pub backtracks: usize,
}

/// One search frame: the shuffled candidates for a cell plus a cursor over
/// the ones not yet tried.
#[derive(Debug, Clone)]
struct Frame {
    candidates: SmallVec<[Value; 16]>,
    next: usize,
}

/// A randomized depth-first backtracking solver.
///
/// The solver owns its randomness source: [`Solver::new`] seeds it from
/// entropy, [`Solver::with_seed`] makes the entire search deterministic for
/// a given grid. One solver may be reused across many grids; its counters
/// are reset at the start of every [`Solver::solve`] call.
#[derive(Debug, Clone)]
pub struct Solver {
    rng: fastrand::Rng,
    stats: SolveStats,
}

impl Solver {
    /// Creates a solver with an entropy-seeded randomness source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
            stats: SolveStats::default(),
        }
    }

    /// Creates a solver whose candidate shuffles derive from `seed`.
    ///
    /// Two solvers built from the same seed make identical decisions on
    /// identical grids.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            stats: SolveStats::default(),
        }
    }

    /// Counters recorded by the most recent [`Solver::solve`] call.
    #[must_use]
    pub const fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Fills every empty cell of `grid` with a constraint-satisfying value.
    ///
    /// The grid may be partially filled. Its existing values are treated as
    /// immutable givens; only cells holding 0 are searched. On success the
    /// grid is completely filled and consistent. On failure every tentative
    /// placement has been rolled back, leaving the grid exactly as passed in.
    ///
    /// # Errors
    ///
    /// [`Unsolvable`] when the givens already conflict with each other, or
    /// when the search exhausts every candidate ordering without finding a
    /// completion.
    pub fn solve(&mut self, grid: &mut Grid) -> Result<(), Unsolvable> {
        self.stats = SolveStats::default();

        if !validate::is_consistent(grid) {
            return Err(Unsolvable);
        }

        let cells = grid.unfilled_cells();
        if cells.is_empty() {
            return Ok(());
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(cells.len());
        stack.push(self.fresh_frame(grid.max_value()));

        while !stack.is_empty() {
            let depth = stack.len() - 1;
            let Coord { row, col } = cells[depth];

            match self.next_accepted(&mut stack[depth], grid, row, col) {
                Some(val) => {
                    grid.set(row, col, val);
                    self.stats.placements += 1;

                    if stack.len() == cells.len() {
                        return Ok(());
                    }
                    let frame = self.fresh_frame(grid.max_value());
                    stack.push(frame);
                }
                None => {
                    // Exhausted: undo this cell and resume the previous frame.
                    stack.pop();
                    self.stats.backtracks += 1;
                    grid.set(row, col, 0);
                }
            }
        }

        Err(Unsolvable)
    }

    /// Builds the frame for a newly arrived-at cell: the full `[1, N]` list
    /// in fresh uniformly random order.
    fn fresh_frame(&mut self, max: Value) -> Frame {
        let mut candidates: SmallVec<[Value; 16]> = (1..=max).collect();
        self.rng.shuffle(&mut candidates);
        Frame {
            candidates,
            next: 0,
        }
    }

    /// Advances `frame` to its next validator-accepted candidate for the
    /// cell at `(row, col)`, if any remains.
    ///
    /// The cell may still hold the frame's previously tried value; since a
    /// frame's candidates are distinct, that stale value can never be the
    /// one under test and the checks read as if the cell were empty.
    fn next_accepted(
        &mut self,
        frame: &mut Frame,
        grid: &Grid,
        row: usize,
        col: usize,
    ) -> Option<Value> {
        while frame.next < frame.candidates.len() {
            let val = frame.candidates[frame.next];
            frame.next += 1;
            self.stats.candidates += 1;

            if validate::validate(grid, row, col, val).is_ok() {
                return Some(val);
            }
        }
        None
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
