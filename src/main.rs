//! # SudokuEngine
//!
//! `SudokuEngine` is a command-line generator and solver for generalized
//! N×N Sudoku puzzles. It fills empty grids with a randomized backtracking
//! search, occludes solved grids into playable puzzles, and solves grids
//! supplied as plain text files.
//!
//! ## Features
//!
//! -   **Generation**: Produce a puzzle of any perfect-square size by solving
//!     an empty grid and hiding a configurable number of cells.
//! -   **Solving**: Complete a partially filled grid read from a text file
//!     (one row per line, cells as space-separated integers, 0 for empty).
//! -   **Seeding**: Every random choice derives from one optional `--seed`,
//!     making runs reproducible.
//! -   **Verification**: Option to re-check the finished grid against the
//!     row/column/box uniqueness invariant.
//! -   **Statistics**: Search counters (placements, candidates, backtracks),
//!     timing, and memory usage.
//! -   **Memory Management**: Uses `tikv-jemallocator` for memory allocation
//!     and provides memory usage statistics.
//!
//! ## Usage
//!
//! ```sh
//! sudoku-engine [GLOBAL_OPTIONS] [SUBCOMMAND]
//! ```
//!
//! ### Global Argument
//!
//! -   `path`: If provided as the *only* argument (without a subcommand),
//!     it's treated as a path to a grid file to be solved.
//!
//!     ```sh
//!     sudoku-engine <path_to_grid_file>
//!     ```
//!
//! ### Subcommands
//!
//! 1.  **`generate`**: Generate a puzzle. Defaults reproduce the classic
//!     flow: a solved 9×9 grid with 10 cells hidden.
//!     ```sh
//!     sudoku-engine generate [--size <N>] [--hide <K>] [--seed <S>] [--show-solution]
//!     ```
//!
//! 2.  **`solve`**: Solve a grid file.
//!     ```sh
//!     sudoku-engine solve --path <path_to_grid_file> [--seed <S>]
//!     ```
//!
//! 3.  **`completions`**: Generate shell completion scripts.
//!     ```sh
//!     sudoku-engine completions <SHELL>
//!     ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug output (default: `false`).
//! -   `--verify`: Re-check the finished grid (default: `true`).
//! -   `--stats`: Print statistics after searching (default: `true`).
//!
//! ## Example Invocations
//!
//! ```sh
//! # Generate a standard puzzle
//! sudoku-engine generate
//!
//! # Generate a reproducible 16x16 puzzle with 40 hidden cells
//! sudoku-engine generate --size 16 --hide 40 --seed 7 --show-solution
//!
//! # Solve a grid from a file
//! sudoku-engine solve --path puzzle.txt
//! ```
//!
//! This file (`main.rs`) contains the entry point, CLI parsing, the textual
//! grid format, and result/statistics reporting. All printing lives here;
//! the engine modules under `sudoku` only return data.

use crate::sudoku::error::Unsolvable;
use crate::sudoku::generate::Generator;
use crate::sudoku::grid::{Grid, Value};
use crate::sudoku::solve::{SolveStats, Solver};
use crate::sudoku::validate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tikv_jemalloc_ctl::{epoch, stats};

// Engine modules; the library crate exposes the same tree.
mod sudoku;

/// Global allocator using `tikv-jemallocator` for potentially better
/// performance and memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Defines the command-line interface for the SudokuEngine application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku-engine", version, about = "A configurable Sudoku generator and solver")]
struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a grid file to solve.
    #[arg(global = true)]
    path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `generate`, `solve`).
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    common: CommonOptions,
}

/// Enumerates the available subcommands for the SudokuEngine.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a puzzle: solve an empty grid, then hide cells.
    Generate {
        /// Grid dimension N; must be a perfect square.
        #[arg(short = 'n', long, default_value_t = 9)]
        size: usize,

        /// Number of cells to hide, at most N*N.
        #[arg(short = 'k', long, default_value_t = 10)]
        hide: usize,

        /// Seed for the solver's and generator's random choices.
        /// Omit to seed from entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// Also print the solved grid the puzzle was cut from.
        #[arg(long, default_value_t = false)]
        show_solution: bool,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a grid file: one row per line, space-separated integers, 0 for
    /// empty cells.
    Solve {
        /// Path to the grid file.
        #[arg(short, long)]
        path: PathBuf,

        /// Seed for the solver's random choices. Omit to seed from entropy.
        #[arg(long)]
        seed: Option<u64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
struct CommonOptions {
    /// Enable debug output, providing more verbose reporting while searching.
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Re-check the finished grid against the uniqueness invariant.
    #[arg(long, default_value_t = true)]
    verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(long, default_value_t = true)]
    stats: bool,
}

/// Main entry point of the SudokuEngine application.
///
/// Parses command-line arguments, dispatches to the appropriate command
/// handler, and manages the overall execution flow.
fn main() {
    let cli = Cli::parse();

    // Handle the case where a path is provided globally without a
    // subcommand. This defaults to solving a grid file.
    if let Some(path) = cli.path.clone() {
        if cli.command.is_none() {
            exit_on_error(run_solve(&path, None, &cli.common));
            return;
        }
    }

    match cli.command {
        Some(Commands::Generate {
            size,
            hide,
            seed,
            show_solution,
            common,
        }) => {
            exit_on_error(run_generate(size, hide, seed, show_solution, &common));
        }

        Some(Commands::Solve { path, seed, common }) => {
            exit_on_error(run_solve(&path, seed, &common));
        }

        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
        }

        None => {
            // Reached when no subcommand was provided and `cli.path` was
            // also None; a Some path was handled by the first block.
            if cli.path.is_none() {
                eprintln!("No command provided. Use --help for more information.");
                std::process::exit(1);
            }
        }
    }
}

/// Prints the error and exits non-zero when a command handler failed.
fn exit_on_error(result: Result<(), String>) {
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Generates a puzzle: constructs an empty grid, solves it, occludes `hide`
/// cells, and reports the results.
///
/// # Arguments
/// * `size` - Grid dimension; must be a perfect square.
/// * `hide` - Number of cells to hide.
/// * `seed` - Optional seed shared by the solver and the generator.
/// * `show_solution` - Whether to print the pre-occlusion solved grid.
/// * `common` - Debug, verification, and statistics options.
fn run_generate(
    size: usize,
    hide: usize,
    seed: Option<u64>,
    show_solution: bool,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = std::time::Instant::now();
    let mut grid = Grid::new(size).map_err(|e| format!("Error: {e}"))?;
    let unfilled = grid.cell_count();
    let setup_time = time.elapsed();

    let (outcome, elapsed, solver_stats) = solve_grid(&mut grid, seed, common.debug);
    outcome.map_err(|e| format!("Error: {e}"))?;

    if common.verify {
        verify_grid(&grid);
    }

    if show_solution {
        println!("Solution:\n{}", render_grid(&grid));
    }

    let mut generator = seed.map_or_else(Generator::new, Generator::with_seed);
    let hidden = generator
        .occlude(&mut grid, hide)
        .map_err(|e| format!("Error: {e}"))?;

    println!("Puzzle ({} hidden):\n{}", hidden.len(), render_grid(&grid));

    if common.stats {
        let (allocated_mib, resident_mib) = memory_mib();
        print_stats(
            setup_time,
            elapsed,
            &grid,
            unfilled,
            Some(hidden.len()),
            &solver_stats,
            allocated_mib,
            resident_mib,
            true,
        );
    }

    Ok(())
}

/// Solves a grid file and reports the results.
///
/// # Arguments
/// * `path` - The grid file, in the textual format of `parse_textual_grid`.
/// * `seed` - Optional seed for the solver.
/// * `common` - Debug, verification, and statistics options.
fn run_solve(path: &Path, seed: Option<u64>, common: &CommonOptions) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Grid file does not exist: {}", path.display()));
    }

    if !path.is_file() {
        return Err(format!("Provided path is not a file: {}", path.display()));
    }

    let time = std::time::Instant::now();
    let input = std::fs::read_to_string(path)
        .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
    let mut grid =
        parse_textual_grid(&input).map_err(|e| format!("Error parsing grid file: {e}"))?;
    let unfilled = grid.unfilled_cells().len();
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());

    let (outcome, elapsed, solver_stats) = solve_grid(&mut grid, seed, common.debug);

    match outcome {
        Ok(()) => {
            if common.verify {
                verify_grid(&grid);
            }
            println!("Solution:\n{}", render_grid(&grid));
        }
        Err(Unsolvable) => println!("No solution found"),
    }

    if common.stats {
        let (allocated_mib, resident_mib) = memory_mib();
        print_stats(
            parse_time,
            elapsed,
            &grid,
            unfilled,
            None,
            &solver_stats,
            allocated_mib,
            resident_mib,
            outcome.is_ok(),
        );
    }

    Ok(())
}

/// Runs the backtracking search over `grid`.
///
/// # Arguments
/// * `grid` - The grid to fill; mutated in place.
/// * `seed` - Optional seed; entropy-seeded when absent.
/// * `debug` - Boolean flag to enable debug printing.
///
/// # Returns
/// A tuple containing:
/// * `Result<(), Unsolvable>`: The search outcome.
/// * `Duration`: The time taken by the search.
/// * `SolveStats`: Counters collected during the search.
fn solve_grid(
    grid: &mut Grid,
    seed: Option<u64>,
    debug: bool,
) -> (Result<(), Unsolvable>, Duration, SolveStats) {
    // Advance epoch for jemalloc stats, helps isolate memory usage for this
    // solving phase.
    epoch::advance().unwrap();

    if debug {
        println!("Grid size: {}", grid.size());
        println!("Box size: {}", grid.root());
        println!("Unfilled cells: {}", grid.unfilled_cells().len());
    }

    let time = std::time::Instant::now();

    let mut solver = seed.map_or_else(Solver::new, Solver::with_seed);
    let outcome = solver.solve(grid);

    let elapsed = time.elapsed();

    if debug {
        println!("Outcome: {outcome:?}");
        println!("Time: {elapsed:?}");
    }

    (outcome, elapsed, solver.stats())
}

/// Re-checks a finished grid against the uniqueness invariant.
///
/// Prints whether the verification was successful; panics if it was not,
/// since a bad finished grid means a solver bug, not bad user input.
fn verify_grid(grid: &Grid) {
    let ok = validate::is_solved(grid);
    println!("Verified: {ok:?}");
    assert!(ok, "Solution failed verification!");
}

/// Reads current allocated and resident memory, in MiB.
fn memory_mib() -> (f64, f64) {
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Renders a grid in the textual contract: each row as `size`
/// space-separated integers (0 for empty cells), one row per line.
fn render_grid(grid: &Grid) -> String {
    grid.rows().map(|row| row.iter().join(" ")).join("\n")
}

/// Parses the textual grid format back into a `Grid`.
///
/// Each non-empty line is a row of space-separated integers; `0` marks an
/// empty cell. Lines starting with '#' are ignored. The number of rows
/// fixes the grid size; every row must have exactly that many cells and no
/// value may exceed the size.
///
/// # Errors
/// A human-readable description of the first malformed line or cell.
fn parse_textual_grid(input: &str) -> Result<Grid, String> {
    let lines = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect_vec();

    let size = lines.len();
    let mut grid = Grid::new(size).map_err(|e| e.to_string())?;

    for (row, line) in lines.iter().enumerate() {
        let values = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|e| format!("row {row}: bad cell {token:?}: {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != size {
            return Err(format!(
                "row {row} has {} cells, expected {size}",
                values.len()
            ));
        }

        for (col, &val) in values.iter().enumerate() {
            if val > size {
                return Err(format!("row {row}: value {val} exceeds grid size {size}"));
            }
            grid.set(row, col, val as Value);
        }
    }

    Ok(grid)
}

/// Helper function to print a single statistic line in a formatted table row.
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The value of the statistic, implementing `std::fmt::Display`.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
///
/// # Arguments
/// * `label` - The description of the statistic.
/// * `value` - The raw count for the statistic.
/// * `elapsed` - The elapsed time in seconds, used to calculate the rate.
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
///
/// # Arguments
/// * `setup_time` - Duration spent building or parsing the grid.
/// * `elapsed` - Duration spent by the search.
/// * `grid` - The grid in its final state.
/// * `unfilled` - Number of empty cells before the search.
/// * `hidden` - Number of hidden cells, for generation runs.
/// * `s` - `SolveStats` collected by the solver.
/// * `allocated` - Allocated memory in MiB.
/// * `resident` - Resident memory in MiB.
/// * `solved` - Whether the search succeeded.
#[allow(clippy::too_many_arguments)]
fn print_stats(
    setup_time: Duration,
    elapsed: Duration,
    grid: &Grid,
    unfilled: usize,
    hidden: Option<usize>,
    s: &SolveStats,
    allocated: f64,
    resident: f64,
    solved: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Setup time (s)", format!("{:.3}", setup_time.as_secs_f64()));
    stat_line("Grid size", grid.size());
    stat_line("Box size", grid.root());
    stat_line("Cells", grid.cell_count());
    stat_line("Unfilled cells", unfilled);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Placements", s.placements, elapsed_secs);
    stat_line_with_rate("Candidates", s.candidates, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    if let Some(hidden) = hidden {
        stat_line("Hidden cells", hidden);
    }
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if solved {
        println!("\nSOLVED");
    } else {
        println!("\nUNSOLVABLE");
    }
}
