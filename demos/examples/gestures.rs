// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture basics.
//!
//! Drive a viewport with a scripted mouse drag, a right-button twist, a
//! two-finger pinch and a few wheel notches, logging each resulting transform.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p render_space_demos --example gestures`

use kurbo::Point;
use render_space::{GestureInterpreter, PointerButton, PointerId, ViewportConfig};
use render_space_demos::{init_logging, logged_viewport};

fn main() {
    init_logging();

    let mut view = logged_viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    log::info!("pan with the primary button");
    let mouse = PointerId(1);
    gestures.pointer_down(mouse, Point::new(100.0, 100.0), PointerButton::Primary);
    for step in 1..=4 {
        let x = 100.0 + 25.0 * f64::from(step);
        gestures.pointer_move(mouse, Point::new(x, 100.0), &mut view);
    }
    gestures.pointer_up(mouse);

    log::info!("rotate with the secondary button");
    gestures.pointer_down(mouse, Point::new(400.0, 300.0), PointerButton::Secondary);
    gestures.pointer_move(mouse, Point::new(450.0, 300.0), &mut view);
    gestures.pointer_up(mouse);

    log::info!("pinch apart with two fingers");
    let (a, b) = (PointerId(10), PointerId(11));
    gestures.pointer_down(a, Point::new(300.0, 300.0), PointerButton::Primary);
    gestures.pointer_down(b, Point::new(500.0, 300.0), PointerButton::Primary);
    for step in 1..=4 {
        let x = 500.0 + 50.0 * f64::from(step);
        gestures.pointer_move(b, Point::new(x, 300.0), &mut view);
    }
    gestures.pointer_up(b);
    gestures.pointer_up(a);

    log::info!("scroll one notch in, then two out");
    let cursor = Point::new(400.0, 300.0);
    gestures.wheel(cursor, -100.0, &mut view);
    gestures.wheel(cursor, 100.0, &mut view);
    gestures.wheel(cursor, 100.0, &mut view);

    let info = view.debug_info();
    log::info!("final: {info:?}");
    log::info!(
        "surface received {} primitive calls",
        view.surface().ops().len()
    );
}
