//! Benchmarks for the sliding puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use npuzzle::{PuzzleState, SearchMode, SolveOptions, Solver};

/// A solvable 3x3 board several moves from the goal.
fn hard_3x3() -> PuzzleState {
    PuzzleState::new(&[[8u32, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap()
}

/// Benchmark solving a 3x3 board in lockstep mode.
fn bench_solve_3x3(c: &mut Criterion) {
    let board = hard_3x3();
    c.bench_function("solve_3x3", |b| b.iter(|| Solver::new(black_box(&board))));
}

/// Benchmark proving a 3x3 board unsolvable via its twin.
fn bench_unsolvable_3x3(c: &mut Criterion) {
    let board = hard_3x3().twin();
    c.bench_function("unsolvable_3x3", |b| {
        b.iter(|| Solver::new(black_box(&board)))
    });
}

/// Benchmark the threaded search on a scrambled 4x4 board.
fn bench_solve_4x4_parallel(c: &mut Criterion) {
    let board = PuzzleState::scramble(4, 30, &mut StdRng::seed_from_u64(1)).unwrap();
    let options = SolveOptions {
        mode: SearchMode::Parallel,
        cancel: None,
    };

    let mut group = c.benchmark_group("4x4");
    group.sample_size(10);
    group.bench_function("solve_parallel", |b| {
        b.iter(|| Solver::with_options(black_box(&board), options))
    });
    group.finish();
}

/// Benchmark the heuristic on a 4x4 board.
fn bench_manhattan(c: &mut Criterion) {
    let board = PuzzleState::scramble(4, 60, &mut StdRng::seed_from_u64(2)).unwrap();
    c.bench_function("manhattan_4x4", |b| b.iter(|| black_box(&board).manhattan()));
}

/// Benchmark neighbor generation on a 4x4 board.
fn bench_neighbors(c: &mut Criterion) {
    let board = PuzzleState::scramble(4, 60, &mut StdRng::seed_from_u64(3)).unwrap();
    c.bench_function("neighbors_4x4", |b| b.iter(|| black_box(&board).neighbors()));
}

criterion_group!(
    benches,
    bench_solve_3x3,
    bench_unsolvable_3x3,
    bench_solve_4x4_parallel,
    bench_manhattan,
    bench_neighbors
);
criterion_main!(benches);
