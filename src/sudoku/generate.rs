#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Occludes solved grids into playable puzzles.
//!
//! A generator picks coordinates to hide uniformly at random from the whole
//! N×N space by shuffling one permutation of every coordinate and taking a
//! prefix. Drawing without replacement this way terminates unconditionally,
//! where redrawing on duplicates would not for counts near N².

use crate::sudoku::error::ConfigurationError;
use crate::sudoku::grid::{Coord, Grid};
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// The coordinates a generator hid, i.e. the player-fillable cells.
///
/// Membership is disjoint in meaning from "cell is empty": a hidden cell is
/// one the player is expected to fill, and its value is 0 only until play
/// fills it. The set is produced once per puzzle and never mutated by the
/// solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HiddenSet(FxHashSet<Coord>);

impl HiddenSet {
    /// Whether `coord` is player-fillable.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.0.contains(&coord)
    }

    /// The number of hidden coordinates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no coordinates are hidden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the hidden coordinates in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.0.iter()
    }
}

impl FromIterator<Coord> for HiddenSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Turns solved grids into puzzles by hiding cells.
///
/// Owns its randomness source the same way [`crate::sudoku::solve::Solver`]
/// does: [`Generator::new`] seeds from entropy, [`Generator::with_seed`] is
/// deterministic.
#[derive(Debug, Clone)]
pub struct Generator {
    rng: fastrand::Rng,
}

impl Generator {
    /// Creates a generator with an entropy-seeded randomness source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a generator whose coordinate choices derive from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Zeroes `count` distinct cells chosen uniformly from the full
    /// coordinate space and returns them as the puzzle's hidden set.
    ///
    /// The count is range-checked before any cell is touched, so an error
    /// leaves the grid exactly as passed in. `count` may name cells that
    /// are already empty; they become hidden like any other choice.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::HiddenCountOutOfRange`] when `count` exceeds
    /// the grid's cell count.
    pub fn occlude(
        &mut self,
        grid: &mut Grid,
        count: usize,
    ) -> Result<HiddenSet, ConfigurationError> {
        if count > grid.cell_count() {
            return Err(ConfigurationError::HiddenCountOutOfRange {
                requested: count,
                cells: grid.cell_count(),
            });
        }

        let size = grid.size();
        let mut coords = (0..size)
            .cartesian_product(0..size)
            .map(|(row, col)| Coord::new(row, col))
            .collect_vec();
        self.rng.shuffle(&mut coords);

        let mut hidden = FxHashSet::default();
        for &coord in coords.iter().take(count) {
            grid.set(coord.row, coord.col, 0);
            hidden.insert(coord);
        }

        Ok(HiddenSet(hidden))
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::solve::Solver;

    fn solved_nine() -> Grid {
        let mut grid = Grid::new(9).unwrap();
        Solver::with_seed(99).solve(&mut grid).unwrap();
        grid
    }

    fn zero_coords(grid: &Grid) -> Vec<Coord> {
        grid.unfilled_cells()
    }

    #[test]
    fn test_occlude_hides_exactly_count_cells() {
        let mut grid = solved_nine();
        let hidden = Generator::with_seed(1).occlude(&mut grid, 10).unwrap();

        let zeros = zero_coords(&grid);
        assert_eq!(zeros.len(), 10);
        assert_eq!(hidden.len(), 10);
        assert!(zeros.iter().all(|&c| hidden.contains(c)));
    }

    #[test]
    fn test_occlude_rejects_count_above_cell_count() {
        let mut grid = solved_nine();
        let snapshot = grid.clone();

        let result = Generator::with_seed(1).occlude(&mut grid, 82);
        assert_eq!(
            result,
            Err(ConfigurationError::HiddenCountOutOfRange {
                requested: 82,
                cells: 81,
            })
        );
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_occlude_zero_hides_nothing() {
        let mut grid = solved_nine();
        let snapshot = grid.clone();

        let hidden = Generator::with_seed(1).occlude(&mut grid, 0).unwrap();
        assert!(hidden.is_empty());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_occlude_entire_grid() {
        let mut grid = solved_nine();
        let hidden = Generator::with_seed(1).occlude(&mut grid, 81).unwrap();

        assert_eq!(hidden.len(), 81);
        assert_eq!(zero_coords(&grid).len(), 81);
    }

    #[test]
    fn test_same_seed_same_hidden_set() {
        let mut first = solved_nine();
        let mut second = first.clone();

        let a = Generator::with_seed(17).occlude(&mut first, 20).unwrap();
        let b = Generator::with_seed(17).occlude(&mut second, 20).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hidden_set_from_iter() {
        let hidden: HiddenSet = [Coord::new(0, 0), Coord::new(1, 1)].into_iter().collect();
        assert_eq!(hidden.len(), 2);
        assert!(hidden.contains(Coord::new(0, 0)));
        assert!(!hidden.contains(Coord::new(2, 2)));
    }
}
