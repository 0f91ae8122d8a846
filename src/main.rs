//! Sliding Puzzle Solver
//!
//! Reads an n-by-n sliding tile puzzle from a file and prints a shortest
//! sequence of boards leading to the goal, or reports that no solution
//! exists. Also inspects boards and generates scrambled ones.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use npuzzle::{bfs, persistence, PuzzleState, SearchMode, SolveOptions, Solver};

/// Solves sliding tile puzzles with A*.
#[derive(Parser)]
#[command(name = "npuzzle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a board file and print the shortest solution.
    Solve {
        /// Board file: dimension, then the tiles in row-major order.
        board_file: PathBuf,
        /// Search the board and its twin on separate threads.
        #[arg(long)]
        parallel: bool,
        /// Cross-check the move count with breadth-first search (small boards only).
        #[arg(long)]
        verify: bool,
        /// Print node counts and elapsed time.
        #[arg(long)]
        stats: bool,
        /// Also write the report to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the twin of a board.
    Twin { board_file: PathBuf },
    /// Print distance metrics and neighbors of a board.
    Inspect { board_file: PathBuf },
    /// Print a random solvable board.
    Scramble {
        #[arg(short, long, default_value_t = 3)]
        dimension: usize,
        /// Number of random slides away from the goal.
        #[arg(short, long, default_value_t = 40)]
        steps: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve {
            board_file,
            parallel,
            verify,
            stats,
            output,
        } => run_solve(&board_file, parallel, verify, stats, output.as_deref()),
        Command::Twin { board_file } => run_twin(&board_file),
        Command::Inspect { board_file } => run_inspect(&board_file),
        Command::Scramble {
            dimension,
            steps,
            seed,
        } => run_scramble(dimension, steps, seed),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load(board_file: &Path) -> anyhow::Result<PuzzleState> {
    persistence::load_board(board_file)
        .with_context(|| format!("failed to load board from {}", board_file.display()))
}

/// Solves a board file and prints the report.
fn run_solve(
    board_file: &Path,
    parallel: bool,
    verify: bool,
    stats: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let board = load(board_file)?;
    let options = SolveOptions {
        mode: if parallel {
            SearchMode::Parallel
        } else {
            SearchMode::Lockstep
        },
        cancel: None,
    };

    let started = Instant::now();
    let solver = Solver::with_options(&board, options)?;
    let elapsed = started.elapsed();

    print!("{}", persistence::format_report(&solver));

    if stats {
        let search = solver.stats();
        println!(
            "Expanded {} nodes, generated {} in {:.2?}",
            search.expanded, search.generated, elapsed
        );
    }

    if verify {
        let expected = bfs::shortest_path_len(&board);
        if expected != solver.moves() {
            bail!(
                "breadth-first search found {:?} moves but A* found {:?}",
                expected,
                solver.moves()
            );
        }
        println!("Verified against breadth-first search");
    }

    if let Some(path) = output {
        persistence::save_report(path, &solver)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Prints the twin of a board file.
fn run_twin(board_file: &Path) -> anyhow::Result<()> {
    let board = load(board_file)?;
    print!("{}", board.twin());
    Ok(())
}

/// Prints distances and neighbors of a board file.
fn run_inspect(board_file: &Path) -> anyhow::Result<()> {
    let board = load(board_file)?;
    print!("{}", format_inspection(&board));
    Ok(())
}

fn format_inspection(board: &PuzzleState) -> String {
    let neighbors = board.neighbors();
    let mut output = board.to_string();
    output.push_str(&format!("hamming: {}\n", board.hamming()));
    output.push_str(&format!("manhattan: {}\n", board.manhattan()));
    output.push_str(&format!("goal: {}\n", board.is_goal()));
    output.push_str(&format!("neighbors: {}\n", neighbors.len()));
    for neighbor in &neighbors {
        output.push('\n');
        output.push_str(&neighbor.to_string());
    }
    output
}

/// Prints a board scrambled away from the goal.
fn run_scramble(dimension: usize, steps: usize, seed: Option<u64>) -> anyhow::Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let board = PuzzleState::scramble(dimension, steps, &mut rng)?;
    print!("{}", board);
    Ok(())
}
