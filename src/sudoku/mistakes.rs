#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Duplicate detection over the player-fillable cells of a puzzle.
//!
//! Given cells (the non-hidden ones) came out of the solver and are immutable
//! during play, so they are trusted: a hidden cell conflicting with a given is
//! itself a mistake, but the given is never reported.

use crate::sudoku::generate::HiddenSet;
use crate::sudoku::grid::{Coord, Grid};
use rustc_hash::FxHashSet;

/// Coordinates of player-filled cells participating in a row, column, or box
/// duplicate.
///
/// Every hidden coordinate holding a non-zero value is scanned against the
/// rest of its row, column, and box. On a conflict the hidden coordinate is
/// always reported; the cell it conflicts with is reported only when that
/// cell is itself hidden. Safe to call at any point in a session: while all
/// hidden cells still hold 0 the result is empty, since 0 never counts as a
/// duplicate.
#[must_use]
pub fn find_mistakes(grid: &Grid, hidden: &HiddenSet) -> FxHashSet<Coord> {
    let mut mistakes = FxHashSet::default();

    for &coord in hidden.iter() {
        if grid.get(coord.row, coord.col) == 0 {
            continue;
        }
        for other in conflicting_cells(grid, coord) {
            mistakes.insert(coord);
            if hidden.contains(other) {
                mistakes.insert(other);
            }
        }
    }

    mistakes
}

/// Cells other than `coord` in its row, column, or box holding the same
/// value. The box scan is anchored at the box corner, not at `coord`.
fn conflicting_cells(grid: &Grid, coord: Coord) -> Vec<Coord> {
    let val = grid.get(coord.row, coord.col);
    let size = grid.size();
    let root = grid.root();
    let top = coord.row - coord.row % root;
    let left = coord.col - coord.col % root;

    let mut found = Vec::new();

    for col in 0..size {
        if col != coord.col && grid.get(coord.row, col) == val {
            found.push(Coord::new(coord.row, col));
        }
    }

    for row in 0..size {
        if row != coord.row && grid.get(row, coord.col) == val {
            found.push(Coord::new(row, coord.col));
        }
    }

    for row in top..top + root {
        for col in left..left + root {
            let cell = Coord::new(row, col);
            if cell != coord && grid.get(row, col) == val {
                found.push(cell);
            }
        }
    }

    found
}
