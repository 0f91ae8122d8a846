//! Dual A* search for shortest sliding puzzle solutions.
//!
//! The initial board and its twin are searched side by side. Exactly one of
//! the two can reach the goal, so whichever search gets there first decides
//! solvability without exhausting the unsolvable side.
//!
//! Key points:
//! - Priority is `moves + manhattan`; Manhattan distance is admissible and
//!   consistent, so the first goal popped is a shortest solution
//! - Only the immediate parent board is suppressed on expansion; other
//!   repeated boards are re-expanded instead of tracked in a closed set
//! - Nodes share their predecessor through `Rc`, forming a tree that is
//!   walked backwards to rebuild the path

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::thread;

use crate::board::PuzzleState;
use crate::error::SolveError;

/// How the two searches are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// One thread alternating a single expansion on each side.
    #[default]
    Lockstep,
    /// Each side on its own thread, stopped by a shared flag once either
    /// side finishes.
    Parallel,
}

/// Knobs for [`Solver::with_options`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveOptions<'a> {
    pub mode: SearchMode,
    /// Checked between expansion steps; raising it aborts the search with
    /// [`SolveError::Cancelled`].
    pub cancel: Option<&'a AtomicBool>,
}

/// Work done by both searches together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped and expanded.
    pub expanded: usize,
    /// Nodes pushed onto a frontier, starting nodes included.
    pub generated: usize,
}

impl SearchStats {
    fn combined(self, other: Self) -> Self {
        Self {
            expanded: self.expanded + other.expanded,
            generated: self.generated + other.generated,
        }
    }
}

/// A board reached by the search, linked to the node it was expanded from.
struct SearchNode {
    board: PuzzleState,
    moves: usize,
    heuristic: usize,
    /// Cached `moves + heuristic`.
    priority: usize,
    previous: Option<Rc<SearchNode>>,
}

impl Drop for SearchNode {
    // unlink the predecessor chain in a loop; recursive drops of a long
    // chain would overflow the stack
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(node) = next {
            match Rc::try_unwrap(node) {
                Ok(mut node) => next = node.previous.take(),
                Err(_) => break,
            }
        }
    }
}

/// Heap entry; `sequence` records insertion order for tie-breaking.
struct FrontierEntry {
    node: Rc<SearchNode>,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed on every key: BinaryHeap pops the greatest entry
        other
            .node
            .priority
            .cmp(&self.node.priority)
            .then_with(|| other.node.heuristic.cmp(&self.node.heuristic))
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// One A* search that advances a single expansion per [`Frontier::step`].
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
    stats: SearchStats,
}

impl Frontier {
    fn new(start: PuzzleState) -> Self {
        let mut frontier = Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            stats: SearchStats::default(),
        };
        frontier.push(start, 0, None);
        frontier
    }

    fn push(&mut self, board: PuzzleState, moves: usize, previous: Option<Rc<SearchNode>>) {
        let heuristic = board.manhattan();
        let node = SearchNode {
            board,
            moves,
            heuristic,
            priority: moves + heuristic,
            previous,
        };
        self.heap.push(FrontierEntry {
            node: Rc::new(node),
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.stats.generated += 1;
    }

    /// Pops the lowest-priority node. Returns the path to it if it is the
    /// goal, otherwise expands it and returns `None`.
    fn step(&mut self) -> Result<Option<Vec<PuzzleState>>, SolveError> {
        let FrontierEntry { node, .. } = self.heap.pop().ok_or(SolveError::FrontierExhausted)?;

        if node.board.is_goal() {
            return Ok(Some(reconstruct_path(&node)));
        }

        self.stats.expanded += 1;
        for neighbor in node.board.neighbors() {
            // skip the slide that undoes the one that produced this node
            if node
                .previous
                .as_ref()
                .is_some_and(|previous| previous.board == neighbor)
            {
                continue;
            }
            self.push(neighbor, node.moves + 1, Some(Rc::clone(&node)));
        }

        Ok(None)
    }
}

/// Follows predecessor links from `goal` back to the start.
fn reconstruct_path(goal: &Rc<SearchNode>) -> Vec<PuzzleState> {
    let mut path = Vec::with_capacity(goal.moves + 1);
    let mut current = Some(goal);

    while let Some(node) = current {
        path.push(node.board.clone());
        current = node.previous.as_ref();
    }

    path.reverse();
    path
}

#[inline]
fn is_raised(flag: Option<&AtomicBool>) -> bool {
    flag.is_some_and(|flag| flag.load(AtomicOrdering::Relaxed))
}

/// What one side of the search ended with.
struct SideOutcome {
    path: Option<Vec<PuzzleState>>,
    stats: SearchStats,
}

/// Verdict on an initial board: solvable with a shortest path, or not.
///
/// The search runs to completion inside the constructor; every query is a
/// plain read of the stored result.
#[derive(Clone, Debug)]
pub struct Solver {
    solution: Option<Vec<PuzzleState>>,
    stats: SearchStats,
}

impl Solver {
    /// Solves `initial` with the default lockstep search.
    pub fn new(initial: &PuzzleState) -> Result<Self, SolveError> {
        Self::with_options(initial, SolveOptions::default())
    }

    pub fn with_options(
        initial: &PuzzleState,
        options: SolveOptions<'_>,
    ) -> Result<Self, SolveError> {
        let (original, twin) = match options.mode {
            SearchMode::Lockstep => solve_lockstep(initial, options.cancel)?,
            SearchMode::Parallel => solve_parallel(initial, options.cancel)?,
        };
        let stats = original.stats.combined(twin.stats);

        match (original.path, twin.path) {
            (Some(path), _) => Ok(Self {
                solution: Some(path),
                stats,
            }),
            (None, Some(_)) => Ok(Self {
                solution: None,
                stats,
            }),
            (None, None) => Err(SolveError::FrontierExhausted),
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Fewest slides from the initial board to the goal, `None` if unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards from the initial board to the goal inclusive, `None` if unsolvable.
    pub fn solution(&self) -> Option<&[PuzzleState]> {
        self.solution.as_deref()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Alternates one expansion on the original board's frontier with one on
/// the twin's until either reaches its goal.
fn solve_lockstep(
    initial: &PuzzleState,
    cancel: Option<&AtomicBool>,
) -> Result<(SideOutcome, SideOutcome), SolveError> {
    let mut original = Frontier::new(initial.clone());
    let mut twin = Frontier::new(initial.twin());

    loop {
        if is_raised(cancel) {
            return Err(SolveError::Cancelled);
        }

        if let Some(path) = original.step()? {
            return Ok((
                SideOutcome {
                    path: Some(path),
                    stats: original.stats,
                },
                SideOutcome {
                    path: None,
                    stats: twin.stats,
                },
            ));
        }

        if let Some(path) = twin.step()? {
            return Ok((
                SideOutcome {
                    path: None,
                    stats: original.stats,
                },
                SideOutcome {
                    path: Some(path),
                    stats: twin.stats,
                },
            ));
        }
    }
}

/// Runs each frontier on its own scoped thread. The frontiers share nothing
/// but the stop flag; nodes never leave the thread that created them.
fn solve_parallel(
    initial: &PuzzleState,
    cancel: Option<&AtomicBool>,
) -> Result<(SideOutcome, SideOutcome), SolveError> {
    let stop = AtomicBool::new(false);
    let stop = &stop;
    let twin_start = initial.twin();

    let (original, twin) = thread::scope(|scope| {
        let original = scope.spawn(move || search_until_stopped(initial.clone(), stop, cancel));
        let twin = scope.spawn(move || search_until_stopped(twin_start, stop, cancel));
        (original.join(), twin.join())
    });

    let original = original.map_err(|_| SolveError::WorkerPanicked)??;
    let twin = twin.map_err(|_| SolveError::WorkerPanicked)??;
    Ok((original, twin))
}

fn search_until_stopped(
    start: PuzzleState,
    stop: &AtomicBool,
    cancel: Option<&AtomicBool>,
) -> Result<SideOutcome, SolveError> {
    let mut frontier = Frontier::new(start);

    loop {
        if stop.load(AtomicOrdering::Acquire) {
            return Ok(SideOutcome {
                path: None,
                stats: frontier.stats,
            });
        }
        if is_raised(cancel) {
            stop.store(true, AtomicOrdering::Release);
            return Err(SolveError::Cancelled);
        }

        match frontier.step() {
            Ok(None) => {}
            Ok(Some(path)) => {
                stop.store(true, AtomicOrdering::Release);
                return Ok(SideOutcome {
                    path: Some(path),
                    stats: frontier.stats,
                });
            }
            Err(error) => {
                stop.store(true, AtomicOrdering::Release);
                return Err(error);
            }
        }
    }
}
