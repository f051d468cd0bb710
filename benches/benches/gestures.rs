// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use render_space::{
    GestureInterpreter, PointerButton, PointerId, RecordingSurface, Viewport, ViewportConfig,
};

const MOVES: usize = 256;

fn fresh_viewport() -> Viewport<RecordingSurface> {
    Viewport::with_config(
        RecordingSurface::new(Size::new(1920.0, 1080.0)),
        ViewportConfig::default(),
    )
}

/// Positions of a pointer sweeping a circle of `radius` around `center`.
fn circle_path(center: Point, radius: f64, steps: usize) -> Vec<Point> {
    (0..steps)
        .map(|i| {
            let theta = core::f64::consts::TAU * i as f64 / steps as f64;
            center + radius * kurbo::Vec2::new(theta.cos(), theta.sin())
        })
        .collect()
}

fn bench_drag(c: &mut Criterion) {
    let path = circle_path(Point::new(960.0, 540.0), 300.0, MOVES);
    c.bench_function("drag_pan_256_moves", |b| {
        b.iter_batched(
            || {
                let mut gestures = GestureInterpreter::new();
                gestures.pointer_down(PointerId(1), path[0], PointerButton::Primary);
                (gestures, fresh_viewport())
            },
            |(mut gestures, mut view)| {
                for &p in &path {
                    black_box(gestures.pointer_move(PointerId(1), p, &mut view));
                }
                // Keep the recording from growing across batches.
                view.surface_mut().clear_ops();
                view.transform()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_pinch(c: &mut Criterion) {
    let path = circle_path(Point::new(960.0, 540.0), 250.0, MOVES);
    c.bench_function("pinch_twist_256_moves", |b| {
        b.iter_batched(
            || {
                let mut gestures = GestureInterpreter::new();
                let anchor = Point::new(960.0, 540.0);
                gestures.pointer_down(PointerId(1), anchor, PointerButton::Primary);
                gestures.pointer_down(PointerId(2), path[0], PointerButton::Primary);
                (gestures, fresh_viewport())
            },
            |(mut gestures, mut view)| {
                for &p in &path {
                    black_box(gestures.pointer_move(PointerId(2), p, &mut view));
                }
                view.surface_mut().clear_ops();
                view.transform()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_wheel(c: &mut Criterion) {
    c.bench_function("wheel_256_notches", |b| {
        b.iter_batched(
            || (GestureInterpreter::new(), fresh_viewport()),
            |(gestures, mut view)| {
                for i in 0..MOVES {
                    let delta = if i % 2 == 0 { -100.0 } else { 100.0 };
                    black_box(gestures.wheel(Point::new(400.0, 300.0), delta, &mut view));
                }
                view.surface_mut().clear_ops();
                view.transform()
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_drag, bench_pinch, bench_wheel);
criterion_main!(benches);
