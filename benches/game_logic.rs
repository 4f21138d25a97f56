use criterion::{black_box, criterion_group, criterion_main, Criterion};

use blockfall::core::pieces;
use blockfall::core::{Board, GameState};
use blockfall::types::{PieceKind, Rotation, RunState};

fn bench_collides(c: &mut Criterion) {
    let mut board = Board::new();
    for x in 0..10 {
        board.set(x, 19, Some(PieceKind::I));
    }
    let shape = pieces::shape(PieceKind::T, Rotation::North);

    c.bench_function("collides", |b| {
        b.iter(|| board.collides(black_box(&shape), black_box(3), black_box(17)))
    });
}

fn bench_clear_four_lines(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows()
        })
    });
}

fn bench_gravity_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("gravity_tick", |b| {
        b.iter(|| {
            state.gravity_tick();
            if state.run_state == RunState::GameOver {
                state.reset();
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("rotate_resolve", |b| {
        b.iter(|| {
            pieces::try_rotate(
                black_box(PieceKind::T),
                Rotation::North,
                black_box(3),
                black_box(10),
                |shape, x, y| board.collides(shape, x, y),
            )
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("snapshot", |b| b.iter(|| black_box(state.snapshot())));
}

criterion_group!(
    benches,
    bench_collides,
    bench_clear_four_lines,
    bench_gravity_tick,
    bench_rotate,
    bench_snapshot
);
criterion_main!(benches);
