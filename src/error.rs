//! Error types for board construction, solving and file loading.

use thiserror::Error;

/// A board that cannot be turned into a [`PuzzleState`](crate::board::PuzzleState).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// No board was supplied (empty grid or empty input).
    #[error("no initial board was given")]
    Missing,
    /// The grid is smaller than 2x2.
    #[error("board dimension {dimension} is below the minimum of 2")]
    TooSmall { dimension: usize },
    /// n*n does not fit the tile value range.
    #[error("board dimension {dimension} is too large")]
    TooLarge { dimension: usize },
    /// A row does not have as many columns as there are rows.
    #[error("row {row} has {len} tiles, expected {dimension}")]
    NotSquare {
        row: usize,
        len: usize,
        dimension: usize,
    },
    /// The grid holds no blank (0) tile.
    #[error("board has no blank tile")]
    NoBlank,
    /// A tile value is n*n or greater.
    #[error("tile {tile} is out of range for {cells} cells")]
    TileOutOfRange { tile: u32, cells: usize },
    /// A tile value appears more than once.
    #[error("tile {tile} appears more than once")]
    DuplicateTile { tile: u32 },
    /// Text input contained something other than a non-negative integer.
    #[error("invalid token {token:?} in board description")]
    InvalidToken { token: String },
    /// Text input declared n but did not carry exactly n*n tiles.
    #[error("expected {expected} tiles, found {found}")]
    TileCount { expected: usize, found: usize },
}

/// Errors that end a search before it reaches a verdict.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The caller raised the cancellation flag.
    #[error("search was cancelled")]
    Cancelled,
    /// A frontier ran dry before either side reached its goal.
    #[error("search frontier exhausted without reaching a goal")]
    FrontierExhausted,
    /// A parallel search worker panicked.
    #[error("search worker panicked")]
    WorkerPanicked,
}

/// Errors from reading a board description off disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read board file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Board(#[from] BoardError),
}
