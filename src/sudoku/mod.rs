#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides the core engine for generalized N×N Sudoku puzzles.
//!
//! The pieces compose leaf-first: [`grid`] stores cells, [`validate`] judges
//! placements, [`solve`] fills grids, [`generate`] occludes them into puzzles,
//! [`mistakes`] audits player entries, and [`puzzle`] ties a grid and its hidden
//! cells together for the lifetime of a play session. Nothing in here prints or
//! logs; diagnostics are returned as data.

/// Error types shared across the engine.
pub mod error;

/// Occlusion of solved grids into playable puzzles.
pub mod generate;

/// The cell matrix and its coordinate addressing.
pub mod grid;

/// Duplicate detection over the player-fillable cells of a puzzle.
pub mod mistakes;

/// A play session owning a grid together with its hidden cells.
pub mod puzzle;

/// The randomized depth-first backtracking solver.
pub mod solve;

/// Placement legality checks and whole-grid consistency predicates.
pub mod validate;
