//! File I/O for board descriptions and solution reports.
//!
//! Board files hold the dimension followed by the tiles in row-major order,
//! all whitespace separated:
//!
//! ```text
//! 3
//!  0  1  3
//!  4  2  5
//!  7  8  6
//! ```
//!
//! Reports start with the move count and list every board of the solution,
//! separated by blank lines.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::board::PuzzleState;
use crate::error::LoadError;
use crate::solver::Solver;

/// Reads and parses a board file.
pub fn load_board(path: impl AsRef<Path>) -> Result<PuzzleState, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(content.parse::<PuzzleState>()?)
}

/// Formats the solver's verdict as a human-readable report.
pub fn format_report(solver: &Solver) -> String {
    let Some(path) = solver.solution() else {
        return "No solution possible\n".to_string();
    };

    let mut output = format!("Minimum number of moves = {}\n", path.len() - 1);
    for board in path {
        output.push('\n');
        output.push_str(&board.to_string());
    }
    output
}

/// Writes the report for `solver` to `path`.
pub fn save_report(path: impl AsRef<Path>, solver: &Solver) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_report(solver).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use std::path::PathBuf;

    /// A per-test path in the system temp directory.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("npuzzle-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_load_board() {
        let path = temp_path("load.txt");
        fs::write(&path, "3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();

        let board = load_board(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(board.dimension(), 3);
        assert_eq!(board.tile_at(0, 1), Some(1));
        assert_eq!(board.blank_position(), (0, 0));
    }

    #[test]
    fn test_empty_file_is_missing_board() {
        let path = temp_path("empty.txt");
        fs::write(&path, "\n").unwrap();

        let result = load_board(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(LoadError::Board(BoardError::Missing))));
    }

    #[test]
    fn test_repeated_tile_is_rejected() {
        let path = temp_path("repeated.txt");
        fs::write(&path, "2\n1 1\n2 0\n").unwrap();

        let result = load_board(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            result,
            Err(LoadError::Board(BoardError::DuplicateTile { tile: 1 }))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_board(temp_path("does-not-exist.txt"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_unsolvable_report() {
        let twin = PuzzleState::goal(3).unwrap().twin();
        let solver = Solver::new(&twin).unwrap();
        assert_eq!(format_report(&solver), "No solution possible\n");
    }

    #[test]
    fn test_save_report() {
        let goal = PuzzleState::goal(2).unwrap();
        let solver = Solver::new(&goal).unwrap();
        let path = temp_path("report.txt");

        save_report(&path, &solver).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(written, "Minimum number of moves = 0\n\n2\n1 2\n3 0\n");
    }
}
