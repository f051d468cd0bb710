// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface a [`crate::Viewport`] steers.
//!
//! [`Surface`] is the small slice of a canvas-style 2D context the viewport
//! needs: a resettable transform stack that composes `translate`, `rotate`
//! and `scale` by post-multiplication, `save`/`restore`, and `clear_rect`.
//! Platform bindings implement it for their native context; [`RecordingSurface`]
//! is a headless implementation for tests and debugging.

use alloc::vec::Vec;

use kurbo::{Affine, Rect, Size, Vec2};

/// Canvas-style transform primitives and extent of a drawing surface.
pub trait Surface {
    /// Size of the surface in surface-space units (usually device pixels).
    fn size(&self) -> Size;

    /// Resets the surface transform to identity.
    fn reset_transform(&mut self);

    /// Appends a translation to the surface transform.
    fn translate(&mut self, offset: Vec2);

    /// Appends a rotation, in radians, to the surface transform.
    fn rotate(&mut self, angle: f64);

    /// Appends a (possibly non-uniform) scale to the surface transform.
    fn scale(&mut self, sx: f64, sy: f64);

    /// Pushes the current surface state.
    fn save(&mut self);

    /// Pops the most recently saved surface state.
    fn restore(&mut self);

    /// Clears `rect`, given in the current surface transform's coordinates.
    fn clear_rect(&mut self, rect: Rect);
}

/// Clears the whole surface regardless of its current transform.
///
/// The transform is reset for the duration of the clear and then restored.
pub fn clear_screen<S: Surface + ?Sized>(surface: &mut S) {
    surface.save();
    surface.reset_transform();
    let bounds = surface.size().to_rect();
    surface.clear_rect(bounds);
    surface.restore();
}

/// One primitive call received by a [`RecordingSurface`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceOp {
    /// [`Surface::reset_transform`].
    ResetTransform,
    /// [`Surface::translate`].
    Translate(Vec2),
    /// [`Surface::rotate`].
    Rotate(f64),
    /// [`Surface::scale`].
    Scale(f64, f64),
    /// [`Surface::save`].
    Save,
    /// [`Surface::restore`].
    Restore,
    /// [`Surface::clear_rect`], with the transform active at the time.
    ClearRect {
        /// The rectangle passed in.
        rect: Rect,
        /// Surface transform when the clear was issued.
        transform: Affine,
    },
}

/// Headless [`Surface`] that records every call and tracks the resulting
/// transform.
///
/// It does not rasterize anything.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: Size,
    transform: Affine,
    saved: Vec<Affine>,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    /// Creates a recording surface of the given size with an identity transform.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            saved: Vec::new(),
            ops: Vec::new(),
        }
    }

    /// Resizes the surface.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Transform the surface currently applies to drawing calls.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Every call received since creation or the last [`Self::clear_ops`].
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forgets recorded calls; the tracked transform is kept.
    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn reset_transform(&mut self) {
        self.transform = Affine::IDENTITY;
        self.ops.push(SurfaceOp::ResetTransform);
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
        self.ops.push(SurfaceOp::Translate(offset));
    }

    fn rotate(&mut self, angle: f64) {
        self.transform *= Affine::rotate(angle);
        self.ops.push(SurfaceOp::Rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform *= Affine::scale_non_uniform(sx, sy);
        self.ops.push(SurfaceOp::Scale(sx, sy));
    }

    fn save(&mut self) {
        self.saved.push(self.transform);
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        // Canvas contexts ignore an unbalanced restore.
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
        self.ops.push(SurfaceOp::Restore);
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ops.push(SurfaceOp::ClearRect {
            rect,
            transform: self.transform,
        });
    }
}
