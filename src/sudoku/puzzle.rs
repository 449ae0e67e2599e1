#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A play session owning a grid together with its hidden cells.

use crate::sudoku::generate::HiddenSet;
use crate::sudoku::grid::{Coord, Grid, Value};
use crate::sudoku::mistakes;
use crate::sudoku::validate;
use rustc_hash::FxHashSet;

/// A puzzle under play: the occluded grid plus the coordinates the player
/// may write to.
///
/// Givens are immutable through this interface; only hidden coordinates
/// accept entries, and entries are deliberately not constraint-checked on
/// the way in. Wrong entries are what [`Puzzle::mistakes`] exists to find.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Grid,
    hidden: HiddenSet,
}

impl Puzzle {
    /// Pairs an occluded grid with its hidden set for the session.
    #[must_use]
    pub const fn new(grid: Grid, hidden: HiddenSet) -> Self {
        Self { grid, hidden }
    }

    /// The grid in its current play state.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player-fillable coordinates.
    #[must_use]
    pub const fn hidden(&self) -> &HiddenSet {
        &self.hidden
    }

    /// Whether `coord` accepts player entries.
    #[must_use]
    pub fn is_hidden(&self, coord: Coord) -> bool {
        self.hidden.contains(coord)
    }

    /// Writes `val` at a hidden coordinate.
    ///
    /// Returns false, writing nothing, when `coord` is a given (or outside
    /// the grid entirely) or `val` is outside `[1, N]`.
    pub fn enter(&mut self, coord: Coord, val: Value) -> bool {
        if val == 0 || val > self.grid.max_value() || !self.is_hidden(coord) {
            return false;
        }
        self.grid.set(coord.row, coord.col, val);
        true
    }

    /// Empties a hidden coordinate. Returns false for givens.
    pub fn erase(&mut self, coord: Coord) -> bool {
        if !self.is_hidden(coord) {
            return false;
        }
        self.grid.set(coord.row, coord.col, 0);
        true
    }

    /// Values currently legal at `coord` under the uniqueness constraints,
    /// ascending. Meaningful for hidden, currently empty coordinates.
    #[must_use]
    pub fn candidates(&self, coord: Coord) -> Vec<Value> {
        validate::available_entries(&self.grid, coord.row, coord.col)
    }

    /// Player-filled coordinates currently involved in a duplicate.
    #[must_use]
    pub fn mistakes(&self) -> FxHashSet<Coord> {
        mistakes::find_mistakes(&self.grid, &self.hidden)
    }

    /// Whether every cell is filled and the whole grid is consistent.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        validate::is_solved(&self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::generate::Generator;
    use crate::sudoku::solve::Solver;

    fn fresh_session(seed: u64, hide: usize) -> (Puzzle, Grid) {
        let mut grid = Grid::new(9).unwrap();
        Solver::with_seed(seed).solve(&mut grid).unwrap();
        let solution = grid.clone();
        let hidden = Generator::with_seed(seed).occlude(&mut grid, hide).unwrap();
        (Puzzle::new(grid, hidden), solution)
    }

    fn some_hidden(puzzle: &Puzzle) -> Coord {
        *puzzle.hidden().iter().next().unwrap()
    }

    fn some_given(puzzle: &Puzzle) -> Coord {
        for row in 0..puzzle.grid().size() {
            for col in 0..puzzle.grid().size() {
                let coord = Coord::new(row, col);
                if !puzzle.is_hidden(coord) {
                    return coord;
                }
            }
        }
        unreachable!("puzzle has no givens");
    }

    #[test]
    fn test_enter_fills_hidden_cell() {
        let (mut puzzle, _) = fresh_session(1, 10);
        let coord = some_hidden(&puzzle);

        assert!(puzzle.enter(coord, 3));
        assert_eq!(puzzle.grid().get(coord.row, coord.col), 3);
    }

    #[test]
    fn test_enter_rejects_given_cell() {
        let (mut puzzle, _) = fresh_session(2, 10);
        let coord = some_given(&puzzle);
        let before = puzzle.grid().get(coord.row, coord.col);

        assert!(!puzzle.enter(coord, 3));
        assert_eq!(puzzle.grid().get(coord.row, coord.col), before);
    }

    #[test]
    fn test_enter_rejects_out_of_range_values() {
        let (mut puzzle, _) = fresh_session(3, 10);
        let coord = some_hidden(&puzzle);

        assert!(!puzzle.enter(coord, 0));
        assert!(!puzzle.enter(coord, 10));
        assert!(!puzzle.enter(Coord::new(100, 100), 5));
    }

    #[test]
    fn test_erase_only_hidden_cells() {
        let (mut puzzle, _) = fresh_session(4, 10);
        let hidden = some_hidden(&puzzle);
        let given = some_given(&puzzle);

        puzzle.enter(hidden, 2);
        assert!(puzzle.erase(hidden));
        assert_eq!(puzzle.grid().get(hidden.row, hidden.col), 0);
        assert!(!puzzle.erase(given));
    }

    #[test]
    fn test_candidates_include_solution_value() {
        let (puzzle, solution) = fresh_session(5, 20);
        for &coord in puzzle.hidden().iter() {
            let expected = solution.get(coord.row, coord.col);
            assert!(puzzle.candidates(coord).contains(&expected));
        }
    }

    #[test]
    fn test_mistakes_track_wrong_entry() {
        let mut grid = Grid::new(9).unwrap();
        Solver::with_seed(6).solve(&mut grid).unwrap();
        let clashing = grid.get(0, 2); // stays visible as a given
        grid.set(0, 0, 0);
        let hidden: HiddenSet = [Coord::new(0, 0)].into_iter().collect();
        let mut puzzle = Puzzle::new(grid, hidden);

        assert!(puzzle.mistakes().is_empty());
        puzzle.enter(Coord::new(0, 0), clashing);
        let mistakes = puzzle.mistakes();
        assert_eq!(mistakes.len(), 1);
        assert!(mistakes.contains(&Coord::new(0, 0)));

        puzzle.erase(Coord::new(0, 0));
        assert!(puzzle.mistakes().is_empty());
    }

    #[test]
    fn test_replaying_solution_completes_puzzle() {
        let (mut puzzle, solution) = fresh_session(7, 30);
        assert!(!puzzle.is_complete());

        let entries: Vec<Coord> = puzzle.hidden().iter().copied().collect();
        for coord in entries {
            assert!(puzzle.enter(coord, solution.get(coord.row, coord.col)));
        }

        assert!(puzzle.is_complete());
        assert!(puzzle.mistakes().is_empty());
    }
}
