//! Sliding Puzzle Solver Library
//!
//! Finds shortest solutions to n-by-n sliding tile puzzles with A*, and
//! proves boards unsolvable by racing a second search on the board's twin.

pub mod bfs;
pub mod board;
pub mod error;
pub mod persistence;
pub mod solver;

pub use board::PuzzleState;
pub use error::{BoardError, LoadError, SolveError};
pub use solver::{SearchMode, SearchStats, SolveOptions, Solver};
