// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped motion.
//!
//! Move the target once, then step a simulated 60 Hz frame loop until the
//! current transform settles on it.
//!
//! Run:
//! - `cargo run -p render_space_demos --example damping`

use kurbo::{Point, Vec2};
use render_space::ViewportConfig;
use render_space_demos::{init_logging, logged_viewport};

const FRAME: f64 = 1.0 / 60.0;

fn main() {
    init_logging();

    let config = ViewportConfig::default().with_damping_strength(0.08);
    let mut view = logged_viewport(config);

    view.translate(Vec2::new(200.0, -50.0));
    view.zoom_into(Point::new(400.0, 300.0), 1.5);
    log::info!("target: {:?}", view.target_transform());

    let mut frames = 0_u32;
    while !view.is_settled() && frames < 600 {
        view.clear_screen();
        view.update_damping(FRAME);
        frames += 1;
    }
    log::info!(
        "ran {frames} frames (settled: {}), visible rect {:?}",
        view.is_settled(),
        view.visible_rect()
    );
}
