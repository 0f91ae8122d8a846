//! Exhaustive breadth-first search, used to cross-check A* on small boards.
//!
//! Visits every board reachable from the start, so it is only practical up
//! to 3x3 (181,440 boards per reachable half).

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use crate::board::PuzzleState;

/// Length of a shortest slide sequence from `start` to the goal, or `None`
/// when the goal is unreachable.
pub fn shortest_path_len(start: &PuzzleState) -> Option<usize> {
    if start.is_goal() {
        return Some(0);
    }

    let mut seen: FxHashSet<PuzzleState> = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(start.clone());
    queue.push_back((start.clone(), 0));

    while let Some((board, distance)) = queue.pop_front() {
        for neighbor in board.neighbors() {
            if neighbor.is_goal() {
                return Some(distance + 1);
            }
            if seen.insert(neighbor.clone()) {
                queue.push_back((neighbor, distance + 1));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_is_zero() {
        let goal = PuzzleState::goal(3).unwrap();
        assert_eq!(shortest_path_len(&goal), Some(0));
    }

    #[test]
    fn test_known_distances() {
        let one_away = PuzzleState::new(&[[1u32, 2], [0, 3]]).unwrap();
        assert_eq!(shortest_path_len(&one_away), Some(1));

        let four_away = PuzzleState::new(&[[0u32, 1, 3], [4, 2, 5], [7, 8, 6]]).unwrap();
        assert_eq!(shortest_path_len(&four_away), Some(4));
    }

    #[test]
    fn test_unreachable_goal() {
        let twin = PuzzleState::goal(2).unwrap().twin();
        assert_eq!(shortest_path_len(&twin), None);
    }
}
