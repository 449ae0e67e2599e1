#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Placement legality and whole-grid consistency checks.
//!
//! Everything here is a pure read of the grid: nothing mutates, prints, or
//! logs. Diagnostic detail comes back to the caller as data.

use crate::sudoku::grid::{Grid, Value};
use bit_vec::BitVec;
use itertools::Itertools;

/// Which uniqueness constraint a rejected placement ran into.
///
/// Carried inside `Result<(), Violation>` as search-internal control data;
/// the solver consumes these while backtracking, so this is deliberately not
/// an application error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The value already appears in the target row.
    RowConflict,
    /// The value already appears in the target column.
    ColumnConflict,
    /// The value already appears in the target box.
    BoxConflict,
}

/// Returns true iff `val` does not already appear anywhere in `row`.
#[must_use]
pub fn check_row(grid: &Grid, row: usize, val: Value) -> bool {
    (0..grid.size()).all(|col| grid.get(row, col) != val)
}

/// Returns true iff `val` does not already appear anywhere in `col`.
#[must_use]
pub fn check_column(grid: &Grid, col: usize, val: Value) -> bool {
    (0..grid.size()).all(|row| grid.get(row, col) != val)
}

/// Returns true iff `val` does not already appear in the box containing
/// `(row, col)`.
#[must_use]
pub fn check_box(grid: &Grid, row: usize, col: usize, val: Value) -> bool {
    let root = grid.root();
    let top = row - row % root;
    let left = col - col % root;
    (top..top + root).all(|r| (left..left + root).all(|c| grid.get(r, c) != val))
}

/// Judges placing `val` at `(row, col)` against the current grid state.
///
/// The three unit checks run in row → column → box order; when several
/// constraints fail at once, that order decides which classification is
/// reported. The cell under test is assumed still empty, as during search
/// (a cell's own stale value is not excluded from the scans).
///
/// # Errors
///
/// The first [`Violation`] encountered.
pub fn validate(grid: &Grid, row: usize, col: usize, val: Value) -> Result<(), Violation> {
    if !check_row(grid, row, val) {
        return Err(Violation::RowConflict);
    }
    if !check_column(grid, col, val) {
        return Err(Violation::ColumnConflict);
    }
    if !check_box(grid, row, col, val) {
        return Err(Violation::BoxConflict);
    }
    Ok(())
}

/// Values in `[1, N]` that [`validate`] accepts at `(row, col)`, ascending.
///
/// Like [`validate`], this assumes the cell itself is currently empty.
#[must_use]
pub fn available_entries(grid: &Grid, row: usize, col: usize) -> Vec<Value> {
    (1..=grid.max_value())
        .filter(|&val| validate(grid, row, col, val).is_ok())
        .collect()
}

/// Returns true iff no row, column, or box contains a duplicate non-zero
/// value. Empty cells never conflict.
#[must_use]
pub fn is_consistent(grid: &Grid) -> bool {
    let size = grid.size();
    let root = grid.root();

    for row in 0..size {
        if unit_has_duplicate(grid, (0..size).map(|col| (row, col))) {
            return false;
        }
    }

    for col in 0..size {
        if unit_has_duplicate(grid, (0..size).map(|row| (row, col))) {
            return false;
        }
    }

    for top in (0..size).step_by(root) {
        for left in (0..size).step_by(root) {
            let unit = (top..top + root).cartesian_product(left..left + root);
            if unit_has_duplicate(grid, unit) {
                return false;
            }
        }
    }

    true
}

/// Returns true iff every cell is filled and [`is_consistent`] holds, i.e.
/// every row, column, and box contains each value in `[1, N]` exactly once.
#[must_use]
pub fn is_solved(grid: &Grid) -> bool {
    grid.rows().all(|row| row.iter().all(|&v| v != 0)) && is_consistent(grid)
}

fn unit_has_duplicate(grid: &Grid, unit: impl Iterator<Item = (usize, usize)>) -> bool {
    let mut seen = BitVec::from_elem(grid.size() + 1, false);
    for (row, col) in unit {
        let val = grid.get(row, col) as usize;
        if val == 0 {
            continue;
        }
        if seen[val] {
            return true;
        }
        seen.set(val, true);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solved_four() -> Grid {
        let rows = [[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]];
        let mut grid = Grid::new(4).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, &val) in row.iter().enumerate() {
                grid.set(r, c, val);
            }
        }
        grid
    }

    #[test]
    fn test_unit_checks_on_empty_grid() {
        let grid = Grid::new(9).unwrap();
        assert!(check_row(&grid, 0, 5));
        assert!(check_column(&grid, 0, 5));
        assert!(check_box(&grid, 0, 0, 5));
        assert_eq!(validate(&grid, 0, 0, 5), Ok(()));
    }

    #[test]
    fn test_row_conflict_in_isolation() {
        // (0,2) shares only the row with (0,0) on a 9x9 grid.
        let mut grid = Grid::new(9).unwrap();
        grid.set(0, 2, 5);
        assert_eq!(validate(&grid, 0, 0, 5), Err(Violation::RowConflict));
    }

    #[test]
    fn test_column_conflict_in_isolation() {
        // (3,0) shares only the column with (0,0).
        let mut grid = Grid::new(9).unwrap();
        grid.set(3, 0, 5);
        assert_eq!(validate(&grid, 0, 0, 5), Err(Violation::ColumnConflict));
    }

    #[test]
    fn test_box_conflict_in_isolation() {
        // (1,1) shares only the box with (0,0).
        let mut grid = Grid::new(9).unwrap();
        grid.set(1, 1, 5);
        assert_eq!(validate(&grid, 0, 0, 5), Err(Violation::BoxConflict));
    }

    #[test]
    fn test_row_precedes_column_and_box() {
        // (0,1) fails both the row and the box check; row is reported.
        let mut grid = Grid::new(9).unwrap();
        grid.set(0, 1, 5);
        assert_eq!(validate(&grid, 0, 0, 5), Err(Violation::RowConflict));
    }

    #[test]
    fn test_column_precedes_box() {
        // (1,0) fails both the column and the box check; column is reported.
        let mut grid = Grid::new(9).unwrap();
        grid.set(1, 0, 5);
        assert_eq!(validate(&grid, 0, 0, 5), Err(Violation::ColumnConflict));
    }

    #[test]
    fn test_box_anchoring_uses_box_corner() {
        let mut grid = Grid::new(9).unwrap();
        grid.set(4, 4, 7);
        // (3,5) lies in the same centre box, (0,0) does not.
        assert!(!check_box(&grid, 3, 5, 7));
        assert!(check_box(&grid, 0, 0, 7));
    }

    #[test]
    fn test_available_entries_excludes_unit_values() {
        let mut grid = Grid::new(4).unwrap();
        grid.set(0, 1, 2); // row of (0,0)
        grid.set(2, 0, 3); // column of (0,0)
        grid.set(1, 1, 4); // box of (0,0)
        assert_eq!(available_entries(&grid, 0, 0), vec![1]);
    }

    #[test]
    fn test_available_entries_on_empty_grid() {
        let grid = Grid::new(4).unwrap();
        assert_eq!(available_entries(&grid, 3, 3), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_is_consistent_ignores_empty_cells() {
        let grid = Grid::new(9).unwrap();
        assert!(is_consistent(&grid));
    }

    #[test]
    fn test_is_consistent_rejects_row_duplicate() {
        let mut grid = Grid::new(9).unwrap();
        grid.set(2, 0, 6);
        grid.set(2, 8, 6);
        assert!(!is_consistent(&grid));
    }

    #[test]
    fn test_is_consistent_rejects_box_duplicate() {
        // (0,0) and (1,1) share a box but neither a row nor a column.
        let mut grid = Grid::new(9).unwrap();
        grid.set(0, 0, 3);
        grid.set(1, 1, 3);
        assert!(!is_consistent(&grid));
    }

    #[test]
    fn test_is_solved_accepts_complete_grid() {
        assert!(is_solved(&solved_four()));
    }

    #[test]
    fn test_is_solved_rejects_unfilled_cell() {
        let mut grid = solved_four();
        grid.set(1, 2, 0);
        assert!(!is_solved(&grid));
    }

    #[test]
    fn test_is_solved_rejects_duplicate() {
        let mut grid = solved_four();
        grid.set(1, 2, 3); // row 1 already holds a 3 at (1,0)
        assert!(!is_solved(&grid));
    }
}
