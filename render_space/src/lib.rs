// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=render_space --heading-base-level=0

//! Render Space: pan, zoom and rotate a 2D drawing surface.
//!
//! This crate provides a small, headless model of a movable view over a
//! canvas-style drawing surface. It focuses on:
//! - A [`Transform`] value (translation, uniform zoom, rotation) with
//!   pivot-preserving zoom and rotation, inversion and matrix conversion.
//! - A [`GestureInterpreter`] turning pointer and wheel events into pan,
//!   pinch-zoom and twist gestures, including two-finger pinch.
//! - A [`Viewport`] owning a *current* and a *target* transform, with
//!   optional exponential damping and change listeners.
//!
//! It does **not** deliver input events or schedule frames. Callers are
//! expected to:
//! - Forward pointer and wheel events in one surface-local coordinate frame.
//! - Call [`Viewport::update_damping`] once per frame when damping is enabled.
//! - Implement [`Surface`] for their drawing context (see
//!   `render_space_web_canvas` for `CanvasRenderingContext2d`).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use render_space::{GestureInterpreter, PointerButton, PointerId, RecordingSurface, Viewport};
//!
//! let mut view = Viewport::new(RecordingSurface::new(Size::new(800.0, 600.0)));
//! let mut gestures = GestureInterpreter::new();
//!
//! // Two fingers down, then one spreads away from the other.
//! gestures.pointer_down(PointerId(1), Point::new(300.0, 300.0), PointerButton::Primary);
//! gestures.pointer_down(PointerId(2), Point::new(500.0, 300.0), PointerButton::Primary);
//! gestures.pointer_move(PointerId(2), Point::new(700.0, 300.0), &mut view);
//! assert!((view.transform().zoom - 2.0).abs() < 1e-9);
//!
//! // Convert a click back into the space content is drawn in.
//! let clicked = view.surface_to_viewport(Point::new(400.0, 300.0));
//! assert!((view.viewport_to_surface(clicked) - Point::new(400.0, 300.0)).hypot() < 1e-9);
//! ```
//!
//! ## Damping example
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use render_space::{RecordingSurface, Viewport, ViewportConfig};
//!
//! let config = ViewportConfig::default().with_damping_strength(0.05);
//! let mut view = Viewport::with_config(RecordingSurface::new(Size::new(800.0, 600.0)), config);
//!
//! view.translate(Vec2::new(100.0, 0.0));
//! assert_eq!(view.transform().translation, Vec2::ZERO);
//!
//! // Once per frame:
//! for _ in 0..120 {
//!     view.update_damping(1.0 / 60.0);
//! }
//! assert!((view.transform().translation.x - 100.0).abs() < 1e-6);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform, so rotation and scale commute; the surface receives
//!   `translate`, `rotate`, `scale` in that order.
//! - Degenerate inputs (zero pinch separation, non-positive zoom factors,
//!   non-finite angles or time steps) are ignored rather than allowed to
//!   corrupt the transform.
//! - Rotation is interpolated linearly; no angle wrapping is applied.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod config;
pub mod gesture;
pub mod surface;
mod transform;
mod viewport;

pub use config::{ConfigError, ConfigField, ViewportConfig};
pub use gesture::{
    Gesture, GestureInterpreter, GestureTarget, PointerButton, PointerId, PointerState,
};
pub use surface::{RecordingSurface, Surface, SurfaceOp};
pub use transform::{Transform, TransformDelta, signed_angle};
pub use viewport::{Listener, ListenerId, Viewport, ViewportDebugInfo};
