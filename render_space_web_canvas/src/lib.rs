// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=render_space_web_canvas --heading-base-level=0

//! Web Canvas (2D) binding for `render_space`.
//!
//! This crate provides a [`render_space::Surface`] implementation backed by
//! `web_sys::CanvasRenderingContext2d`, and wires DOM pointer and wheel events
//! of an `HtmlCanvasElement` into a [`render_space::GestureInterpreter`].
//! Everything here is only available when targeting `wasm32`.
//!
//! # Usage
//!
//! ```no_run
//! #[cfg(target_arch = "wasm32")]
//! fn setup(
//!     canvas: web_sys::HtmlCanvasElement,
//! ) -> Result<render_space_web_canvas::CanvasRenderSpace, render_space_web_canvas::SurfaceError> {
//!     let space = render_space_web_canvas::CanvasRenderSpace::new(canvas)?;
//!     space.viewport().borrow_mut().config_mut().damping_strength = 0.05;
//!     Ok(space)
//! }
//! ```
//!
//! The host still owns the frame loop: once per `requestAnimationFrame`, call
//! `clear_screen`, then `update_damping` with the elapsed seconds, then draw.
//!
//! Notes:
//! - Pointer positions are taken from `offsetX`/`offsetY`, relative to the
//!   canvas element.
//! - The canvas gets `touch-action: none` so touch pinches reach the
//!   interpreter instead of scrolling the page, and its context menu is
//!   suppressed so secondary-button drags can rotate.
//! - The wheel listener is registered as non-passive so it can prevent page
//!   scrolling while zooming.
//! - Listeners are removed when the [`CanvasRenderSpace`] is dropped.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
mod input;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
pub use input::CanvasRenderSpace;
#[cfg(target_arch = "wasm32")]
pub use surface::{CanvasSurface, SurfaceError};

use render_space::PointerId;

/// Maps a DOM `PointerEvent.pointerId` to an interpreter pointer id.
#[must_use]
pub fn pointer_id_from_dom(id: i32) -> PointerId {
    PointerId(i64::from(id))
}

#[cfg(test)]
mod tests {
    use render_space::PointerId;

    use super::pointer_id_from_dom;

    #[test]
    fn dom_pointer_ids_are_preserved() {
        assert_eq!(pointer_id_from_dom(1), PointerId(1));
        assert_eq!(pointer_id_from_dom(-1), PointerId(-1));
        assert_ne!(pointer_id_from_dom(2), pointer_id_from_dom(3));
    }
}
