//! 搜索基准：各难度下 get_ai_move 的耗时

use connect_n_ai::test_positions::{EMPTY, MID_1, MID_2};
use connect_n_ai::{get_ai_move, AIConfig, Board, Difficulty, MinimaxAI};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_get_ai_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_ai_move");

    for (name, grid) in [("empty", EMPTY), ("mid_1", MID_1), ("mid_2", MID_2)] {
        let board = Board::from_grid(grid).unwrap();
        for difficulty in Difficulty::ALL {
            group.bench_with_input(
                BenchmarkId::new(difficulty.label(), name),
                &board,
                |b, board| b.iter(|| get_ai_move(black_box(board), difficulty, 4)),
            );
        }
    }

    group.finish();
}

fn bench_move_ordering(c: &mut Criterion) {
    let board = Board::from_grid(MID_2).unwrap();
    let mut group = c.benchmark_group("move_ordering");

    for ordering in [true, false] {
        let ai = MinimaxAI::new(&AIConfig {
            depth: 5,
            move_ordering: ordering,
            ..Default::default()
        });
        group.bench_function(if ordering { "on" } else { "off" }, |b| {
            b.iter(|| ai.search(black_box(&board)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_ai_move, bench_move_ordering);
criterion_main!(benches);
