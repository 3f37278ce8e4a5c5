//! Benchmarks for per-tick game advancement

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mano_core::{GameKind, GestureLabel, Point2};
use mano_games::{Game, GameMachine};
use mano_test::Timeline;

fn bench_idle_tick(c: &mut Criterion) {
    let frames = Timeline::standard().idle(Duration::from_secs(10)).frames();

    for kind in GameKind::ALL {
        c.bench_function(&format!("idle_tick_{}", kind.label()), |b| {
            let mut game = Game::new(kind, 1);
            let mut i = 0usize;
            b.iter(|| {
                let out = game.advance(black_box(&frames[i % frames.len()]));
                i += 1;
                black_box(out)
            })
        });
    }
}

fn bench_trace_drag(c: &mut Criterion) {
    let frames = Timeline::standard()
        .drag(Point2::new(100.0, 100.0), Point2::new(540.0, 380.0), 300)
        .frames();

    c.bench_function("shape_trace_drag_300", |b| {
        b.iter(|| {
            let mut game = Game::new(GameKind::ShapeTrace, 2);
            for frame in &frames {
                black_box(game.advance(frame));
            }
        })
    });
}

fn bench_pose_match_session(c: &mut Criterion) {
    let mut timeline = Timeline::standard();
    for label in GestureLabel::PLAYABLE {
        timeline = timeline.pose(label, Duration::from_millis(500));
    }
    let frames = timeline.frames();

    c.bench_function("pose_match_2500ms", |b| {
        b.iter(|| {
            let mut game = Game::new(GameKind::PoseMatch, 3);
            for frame in &frames {
                black_box(game.advance(frame));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_idle_tick,
    bench_trace_drag,
    bench_pose_match_session
);
criterion_main!(benches);
