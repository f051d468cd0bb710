// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};

/// Translation, uniform zoom and rotation mapping viewport space into
/// surface space.
///
/// A point `p` drawn in viewport space lands on the surface at
/// `rotate(p, rotation) * zoom + translation`. This is the same order a
/// canvas-style transform stack composes `translate`, `rotate` and `scale`,
/// see [`Transform::matrix`].
///
/// `zoom` is always positive. The mutating operations guard against
/// factors that would break that (see [`Transform::zoom_into`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Surface-space offset of the viewport origin.
    pub translation: Vec2,
    /// Uniform scale factor.
    pub zoom: f64,
    /// Rotation in radians.
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform: no offset, zoom `1.0`, no rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        zoom: 1.0,
        rotation: 0.0,
    };

    /// Creates a transform from its three components.
    #[must_use]
    pub const fn new(translation: Vec2, zoom: f64, rotation: f64) -> Self {
        Self {
            translation,
            zoom,
            rotation,
        }
    }

    /// Moves the transform by `delta` in surface space.
    pub fn translate(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Scales by `factor` while keeping the surface-space point `pivot` fixed.
    ///
    /// Factors that are not finite and positive are ignored, as are factors
    /// that would underflow the zoom to zero or overflow it to infinity.
    pub fn zoom_into(&mut self, pivot: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let pivot = pivot.to_vec2();
        let zoomed = Self {
            translation: pivot + (self.translation - pivot) * factor,
            zoom: self.zoom * factor,
            rotation: self.rotation,
        };
        if !zoomed.is_valid() {
            log::debug!(
                "zoom by {factor} from {} would leave the valid range; skipped",
                self.zoom
            );
            return;
        }
        *self = zoomed;
    }

    /// Rotates by `angle` radians while keeping the surface-space point
    /// `pivot` fixed.
    pub fn rotate_around(&mut self, pivot: Point, angle: f64) {
        if !angle.is_finite() {
            return;
        }
        let pivot = pivot.to_vec2();
        self.rotation += angle;
        self.translation = pivot + rotate_vec(self.translation - pivot, angle);
    }

    /// Moves each component a fraction `t` of the way toward `other`.
    ///
    /// Rotation is blended linearly, so crossing the ±π boundary goes the
    /// long way round.
    pub fn lerp(&mut self, other: &Self, t: f64) {
        self.translation = self.translation.lerp(other.translation, t);
        self.zoom = lerp(self.zoom, other.zoom, t);
        self.rotation = lerp(self.rotation, other.rotation, t);
    }

    /// Maps a viewport-space point into surface space.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        (rotate_vec(point.to_vec2(), self.rotation) * self.zoom + self.translation).to_point()
    }

    /// Returns the transform mapping surface space back into viewport space.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let zoom = 1.0 / self.zoom;
        Self {
            translation: rotate_vec(-self.translation, -self.rotation) * zoom,
            zoom,
            rotation: -self.rotation,
        }
    }

    /// Returns the equivalent affine matrix (translate, then rotate, then scale).
    #[must_use]
    pub fn matrix(&self) -> Affine {
        Affine::translate(self.translation)
            * Affine::rotate(self.rotation)
            * Affine::scale(self.zoom)
    }

    /// Applies one incremental [`TransformDelta`].
    pub fn apply_delta(&mut self, delta: TransformDelta) {
        match delta {
            TransformDelta::Translate(offset) => self.translate(offset),
            TransformDelta::ZoomInto { pivot, factor } => self.zoom_into(pivot, factor),
            TransformDelta::RotateAround { pivot, angle } => self.rotate_around(pivot, angle),
        }
    }

    /// Returns `true` when every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.zoom.is_finite() && self.rotation.is_finite()
    }

    /// Returns `true` when every component is finite and the zoom is positive.
    ///
    /// Only valid transforms can be inverted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.zoom > 0.0
    }
}

/// Incremental change to a [`Transform`], as emitted by gesture handling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformDelta {
    /// See [`Transform::translate`].
    Translate(Vec2),
    /// See [`Transform::zoom_into`].
    ZoomInto {
        /// Surface-space point kept fixed.
        pivot: Point,
        /// Multiplicative zoom factor.
        factor: f64,
    },
    /// See [`Transform::rotate_around`].
    RotateAround {
        /// Surface-space point kept fixed.
        pivot: Point,
        /// Rotation in radians.
        angle: f64,
    },
}

/// Shortest signed rotation taking the direction of `from` onto `to`.
///
/// Returns `0.0` when either vector has zero length.
#[must_use]
pub fn signed_angle(from: Vec2, to: Vec2) -> f64 {
    from.cross(to).atan2(from.dot(to))
}

fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    t * b + (1.0 - t) * a
}
