// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the `render_space` demos.
//!
//! The demos run headless against a [`RecordingSurface`] and report what the
//! viewport does through `log`, so run them with `RUST_LOG=info` (or `debug`
//! to also see the interpreter's own messages).

use kurbo::Size;
use render_space::{RecordingSurface, Viewport, ViewportConfig};

/// Surface size used by every demo.
pub const SURFACE_SIZE: Size = Size::new(800.0, 600.0);

/// Initializes `env_logger`, defaulting to the `info` level.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Builds a viewport over a recording surface that logs every change.
pub fn logged_viewport(config: ViewportConfig) -> Viewport<RecordingSurface> {
    let mut viewport = Viewport::with_config(RecordingSurface::new(SURFACE_SIZE), config);
    viewport.add_listener(|view| {
        let t = view.transform();
        log::info!(
            "translation=({:.2}, {:.2}) zoom={:.4} rotation={:.4}",
            t.translation.x,
            t.translation.y,
            t.zoom,
            t.rotation
        );
    });
    viewport
}
