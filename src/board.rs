//! Immutable n-by-n sliding tile board.
//!
//! Tiles are stored as a flat row-major vector where each cell holds a tile
//! number, or 0 for the blank. The goal board lists `1..n*n` in order with
//! the blank in the bottom-right cell.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::BoardError;

/// Value of the blank cell.
pub const BLANK: u32 = 0;

/// Smallest supported board dimension.
pub const MIN_DIMENSION: usize = 2;

/// Converts a linear cell index to (row, col) coordinates.
#[inline(always)]
const fn idx_to_coord(dimension: usize, cell_index: usize) -> (usize, usize) {
    (cell_index / dimension, cell_index % dimension)
}

/// Number of cells on a board, as long as every tile value fits in a `u32`.
fn cell_count(dimension: usize) -> Result<u32, BoardError> {
    dimension
        .checked_mul(dimension)
        .and_then(|cells| u32::try_from(cells).ok())
        .ok_or(BoardError::TooLarge { dimension })
}

/// One board configuration.
///
/// Every operation that slides or swaps tiles returns a new state with its own
/// copy of the grid, so two states never share storage.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PuzzleState {
    dimension: usize,
    tiles: Vec<u32>,
    /// Index of the blank cell, derived from `tiles`.
    blank: usize,
}

impl PuzzleState {
    /// Builds a board from its rows, copying the tiles.
    ///
    /// Only the shape is validated: the grid must be square, at least 2x2,
    /// and contain a blank. Tiles are assumed to be a permutation of
    /// `0..n*n`.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, BoardError> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(BoardError::Missing);
        }

        let mut tiles = Vec::with_capacity(dimension * dimension);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != dimension {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    dimension,
                });
            }
            tiles.extend_from_slice(values);
        }

        Self::from_row_major(dimension, tiles)
    }

    /// Builds a board from `dimension * dimension` tiles in row-major order.
    pub fn from_row_major(dimension: usize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        if dimension < MIN_DIMENSION {
            return Err(BoardError::TooSmall { dimension });
        }
        let expected = cell_count(dimension)? as usize;
        if tiles.len() != expected {
            return Err(BoardError::TileCount {
                expected,
                found: tiles.len(),
            });
        }
        let blank = tiles
            .iter()
            .position(|&tile| tile == BLANK)
            .ok_or(BoardError::NoBlank)?;

        Ok(Self {
            dimension,
            tiles,
            blank,
        })
    }

    /// The solved board of the given dimension.
    pub fn goal(dimension: usize) -> Result<Self, BoardError> {
        if dimension < MIN_DIMENSION {
            return Err(BoardError::TooSmall { dimension });
        }
        let cells = cell_count(dimension)?;
        let tiles = (1..cells).chain(std::iter::once(BLANK)).collect();
        Self::from_row_major(dimension, tiles)
    }

    /// Walks `steps` random blank slides away from the goal board.
    ///
    /// A slide never undoes the one before it. The result is always solvable.
    pub fn scramble<R: Rng + ?Sized>(
        dimension: usize,
        steps: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let mut current = Self::goal(dimension)?;
        let mut previous: Option<Self> = None;

        for _ in 0..steps {
            let candidates: Vec<Self> = current
                .neighbors()
                .into_iter()
                .filter(|neighbor| previous.as_ref() != Some(neighbor))
                .collect();
            // every board has at least two neighbors, so one always survives
            let Some(next) = candidates.choose(&mut *rng).cloned() else {
                break;
            };
            previous = Some(std::mem::replace(&mut current, next));
        }

        Ok(current)
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Tiles in row-major order.
    #[inline]
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Returns the tile at (row, col), or `None` outside the grid.
    pub fn tile_at(&self, row: usize, col: usize) -> Option<u32> {
        (row < self.dimension && col < self.dimension)
            .then(|| self.tiles[row * self.dimension + col])
    }

    /// (row, col) of the blank cell.
    #[inline]
    pub fn blank_position(&self) -> (usize, usize) {
        idx_to_coord(self.dimension, self.blank)
    }

    /// Number of tiles, not counting the blank, out of their goal position.
    pub fn hamming(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(cell, &tile)| tile != BLANK && tile as usize != cell + 1)
            .count()
    }

    /// Sum of the grid distances from each tile to its goal position.
    ///
    /// One slide moves one tile by one cell, so this never overestimates the
    /// remaining moves and changes by exactly one per slide.
    pub fn manhattan(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != BLANK)
            .map(|(cell, &tile)| {
                let (row, col) = idx_to_coord(self.dimension, cell);
                let (goal_row, goal_col) = idx_to_coord(self.dimension, tile as usize - 1);
                row.abs_diff(goal_row) + col.abs_diff(goal_col)
            })
            .sum()
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.manhattan() == 0
    }

    /// All boards one blank slide away, in up, down, left, right order.
    pub fn neighbors(&self) -> Vec<Self> {
        let (row, col) = self.blank_position();
        let last = self.dimension - 1;
        let mut neighbors = Vec::with_capacity(4);

        if row > 0 {
            neighbors.push(self.slide_blank_to(self.blank - self.dimension));
        }
        if row < last {
            neighbors.push(self.slide_blank_to(self.blank + self.dimension));
        }
        if col > 0 {
            neighbors.push(self.slide_blank_to(self.blank - 1));
        }
        if col < last {
            neighbors.push(self.slide_blank_to(self.blank + 1));
        }

        neighbors
    }

    /// Board with the two top-left tiles of the first row exchanged, or of
    /// the second row when the first pair holds the blank.
    ///
    /// Exactly one of a board and its twin can reach the goal.
    pub fn twin(&self) -> Self {
        let (first, second) = if self.tiles[0] != BLANK && self.tiles[1] != BLANK {
            (0, 1)
        } else {
            (self.dimension, self.dimension + 1)
        };
        // a single blank can't sit in both pairs
        debug_assert!(
            self.tiles[first] != BLANK && self.tiles[second] != BLANK,
            "twin swap must not involve the blank"
        );

        let mut tiles = self.tiles.clone();
        tiles.swap(first, second);
        Self {
            dimension: self.dimension,
            tiles,
            blank: self.blank,
        }
    }

    fn slide_blank_to(&self, target: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);
        Self {
            dimension: self.dimension,
            tiles,
            blank: target,
        }
    }
}

/// Dimension on the first line, then one line per row.
impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        writeln!(f, "{}", self.dimension)?;
        for row in self.tiles.chunks(self.dimension) {
            let line = row
                .iter()
                .map(|tile| format!("{tile:>width$}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Parses the dimension followed by the tiles in row-major order, all
/// whitespace separated. Line layout is ignored.
impl FromStr for PuzzleState {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let dimension: usize = match tokens.next() {
            Some(token) => parse_token(token)?,
            None => return Err(BoardError::Missing),
        };
        let tiles = tokens.map(parse_token).collect::<Result<Vec<u32>, _>>()?;
        let state = Self::from_row_major(dimension, tiles)?;
        check_permutation(&state.tiles)?;
        Ok(state)
    }
}

/// Every value in `0..tiles.len()` must appear exactly once, otherwise
/// neither the board nor its twin can reach the goal.
fn check_permutation(tiles: &[u32]) -> Result<(), BoardError> {
    let mut seen = vec![false; tiles.len()];
    for &tile in tiles {
        let slot = seen
            .get_mut(tile as usize)
            .ok_or(BoardError::TileOutOfRange {
                tile,
                cells: tiles.len(),
            })?;
        if *slot {
            return Err(BoardError::DuplicateTile { tile });
        }
        *slot = true;
    }
    Ok(())
}

fn parse_token<T: FromStr>(token: &str) -> Result<T, BoardError> {
    token.parse().map_err(|_| BoardError::InvalidToken {
        token: token.to_string(),
    })
}
