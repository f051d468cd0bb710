// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use render_space::{RecordingSurface, Transform, Viewport, ViewportConfig};

fn bench_update_damping(c: &mut Criterion) {
    let config = ViewportConfig::default().with_damping_strength(0.05);
    let mut view = Viewport::with_config(RecordingSurface::new(Size::new(800.0, 600.0)), config);
    let mut flip = false;

    c.bench_function("update_damping_frame", |b| {
        b.iter(|| {
            // Retarget every frame so the lerp never short-circuits.
            flip = !flip;
            let dx = if flip { 50.0 } else { -50.0 };
            view.translate(Vec2::new(dx, 0.0));
            view.update_damping(black_box(1.0 / 60.0));
            view.surface_mut().clear_ops();
            view.transform()
        });
    });
}

fn bench_visible_rect(c: &mut Criterion) {
    let mut view = Viewport::new(RecordingSurface::new(Size::new(800.0, 600.0)));
    view.set_target(Transform::new(Vec2::new(120.0, -40.0), 1.75, 0.6));
    view.rotate_around(Point::new(400.0, 300.0), 0.25);

    c.bench_function("visible_rect_rotated", |b| {
        b.iter(|| black_box(&view).visible_rect());
    });
}

criterion_group!(benches, bench_update_damping, bench_visible_rect);
criterion_main!(benches);
