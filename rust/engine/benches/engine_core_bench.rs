// rust/engine/benches/engine_core_bench.rs
#![forbid(unsafe_code)]

/**
 * Core engine micro-benchmarks.
 *
 * Focus:
 * - Line clearing on a board with several full rows
 * - Best-move search latency on fixed board states
 * - Easy-move sampling
 * - Session lock path (`apply_move` -> hard drop -> spawn)
 */
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use duel_engine::{
    clear_lines, empty_grid, find_best_move, find_easy_move, Grid, Policy, HeuristicPolicy, Kind,
    SeededSource, Seat, Session, SessionConfig, H, W,
};

fn build_nontrivial_session(seed: u64) -> Session {
    let mut s = Session::new(SessionConfig { seed });
    let mut p = HeuristicPolicy;
    for _ in 0..24 {
        if s.is_over() {
            break;
        }
        let (shape, grid) = s.ai_snapshot();
        let mv = p.choose_move(&shape, &grid);
        if s.apply_move(Seat::Ai, mv).is_err() {
            break;
        }
    }
    s
}

fn striped_grid() -> Grid {
    let mut g = empty_grid();
    for r in (H - 8)..H {
        for c in 0..W {
            g[r][c] = if r % 2 == 0 || c != r % W { 1 } else { 0 };
        }
    }
    g
}

fn bench_clear_lines(c: &mut Criterion) {
    let g = striped_grid();
    c.bench_function("engine.clear_lines.striped", |b| {
        b.iter(|| black_box(clear_lines(black_box(&g))));
    });
}

fn bench_find_best_move(c: &mut Criterion) {
    let empty = empty_grid();
    c.bench_function("policy.best_move.empty_board", |b| {
        b.iter(|| black_box(find_best_move(&Kind::T.shape(), black_box(&empty))));
    });

    let (shape, grid) = build_nontrivial_session(1234).ai_snapshot();
    c.bench_function("policy.best_move.midgame", |b| {
        b.iter(|| black_box(find_best_move(&shape, black_box(&grid))));
    });

    c.bench_function("policy.best_move.heart", |b| {
        b.iter(|| black_box(find_best_move(&Kind::Heart.shape(), black_box(&grid))));
    });
}

fn bench_find_easy_move(c: &mut Criterion) {
    let grid = striped_grid();
    let mut rng = SeededSource::new(7);
    c.bench_function("policy.easy_move", |b| {
        b.iter(|| black_box(find_easy_move(&Kind::L.shape(), &grid, &mut rng)));
    });
}

fn bench_session_apply_move(c: &mut Criterion) {
    c.bench_function("session.apply_move.ai_rollout", |b| {
        b.iter_batched(
            || (Session::new(SessionConfig { seed: 20260228 }), HeuristicPolicy),
            |(mut s, mut p)| {
                for _ in 0..64 {
                    if s.is_over() {
                        break;
                    }
                    let (shape, grid) = s.ai_snapshot();
                    let mv = p.choose_move(&shape, &grid);
                    if s.apply_move(Seat::Ai, mv).is_err() {
                        break;
                    }
                }
                black_box(s.player(Seat::Ai).score)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    engine_core_benches,
    bench_clear_lines,
    bench_find_best_move,
    bench_find_easy_move,
    bench_session_apply_move
);
criterion_main!(engine_core_benches);
