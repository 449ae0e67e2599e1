#![deny(missing_docs)]
//! This crate provides a constraint-satisfaction engine for generalized N×N Sudoku:
//! grid construction, randomized backtracking solving, puzzle generation by cell
//! occlusion, and mistake detection over player-filled cells.

/// The `sudoku` module implements the engine: grid storage, placement validation,
/// the randomized backtracking solver, the puzzle generator and the mistake detector.
pub mod sudoku;
