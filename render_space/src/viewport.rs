// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect, Vec2};

use crate::config::{ConfigError, ViewportConfig};
use crate::gesture::GestureTarget;
use crate::surface::{self, Surface};
use crate::transform::{Transform, TransformDelta};

/// Callback invoked with the viewport each time its transform is applied.
pub type Listener<S> = Box<dyn FnMut(&Viewport<S>)>;

/// Handle returned by [`Viewport::add_listener`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Pan/zoom/rotate state for one drawing surface.
///
/// A `Viewport` keeps two [`Transform`]s:
/// - the *target*, which every mutation (and every gesture) steers;
/// - the *current*, which is what the surface is actually set to.
///
/// With zero [`ViewportConfig::damping_strength`] the two are identical
/// after every mutation. With positive damping the current transform only
/// moves when the host calls [`Viewport::update_damping`], easing
/// exponentially toward the target.
///
/// Whenever the current transform is applied, the surface receives
/// `reset_transform`, `translate`, `rotate` and `scale` in that order, and
/// every listener is called in registration order.
pub struct Viewport<S> {
    surface: S,
    config: ViewportConfig,
    current: Transform,
    target: Transform,
    listeners: Vec<(ListenerId, Listener<S>)>,
    next_listener: u64,
}

impl<S: fmt::Debug> fmt::Debug for Viewport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("surface", &self.surface)
            .field("config", &self.config)
            .field("current", &self.current)
            .field("target", &self.target)
            .field("listeners", &self.listeners.len())
            .field("next_listener", &self.next_listener)
            .finish()
    }
}

impl<S: Surface> Viewport<S> {
    /// Creates a viewport with the default configuration and identity transforms.
    ///
    /// The identity transform is pushed to `surface` immediately.
    #[must_use]
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ViewportConfig::default())
    }

    /// Creates a viewport with `config`, without validating it.
    #[must_use]
    pub fn with_config(surface: S, config: ViewportConfig) -> Self {
        let mut vp = Self {
            surface,
            config,
            current: Transform::IDENTITY,
            target: Transform::IDENTITY,
            listeners: Vec::new(),
            next_listener: 0,
        };
        vp.push_to_surface();
        vp
    }

    /// Creates a viewport with `config` after checking it with
    /// [`ViewportConfig::validate`].
    pub fn try_with_config(surface: S, config: ViewportConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(surface, config))
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Returns the configuration for modification.
    ///
    /// Turning damping off takes effect at the next applied mutation or
    /// damping step, which snaps the current transform to the target.
    pub fn config_mut(&mut self) -> &mut ViewportConfig {
        &mut self.config
    }

    /// Transform currently applied to the surface.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.current
    }

    /// Transform gestures are steering toward.
    #[must_use]
    pub fn target_transform(&self) -> Transform {
        self.target
    }

    /// The surface being steered.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The surface being steered, for drawing.
    ///
    /// Changes made to the surface transform here are overwritten the next
    /// time the viewport applies its transform.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consumes the viewport and returns its surface.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Pans the target by `delta` in surface space and applies.
    pub fn translate(&mut self, delta: Vec2) {
        self.target.translate(delta);
        self.update_transform();
    }

    /// Zooms the target about the surface-space `pivot` and applies.
    pub fn zoom_into(&mut self, pivot: Point, factor: f64) {
        self.target.zoom_into(pivot, factor);
        self.update_transform();
    }

    /// Rotates the target about the surface-space `pivot` and applies.
    pub fn rotate_around(&mut self, pivot: Point, angle: f64) {
        self.target.rotate_around(pivot, angle);
        self.update_transform();
    }

    /// Moves the target a fraction `t` of the way toward `other` and applies.
    ///
    /// A blend that is not [valid](Transform::is_valid), for example when
    /// `other` has a zero zoom or `t` overshoots past it, is ignored.
    pub fn lerp(&mut self, other: &Transform, t: f64) {
        let mut blended = self.target;
        blended.lerp(other, t);
        self.set_target(blended);
    }

    /// Replaces the target and applies.
    ///
    /// A target with a non-positive or non-finite zoom is ignored.
    pub fn set_target(&mut self, target: Transform) {
        if !target.is_valid() {
            log::debug!("rejected invalid target {target:?}");
            return;
        }
        self.target = target;
        self.update_transform();
    }

    /// Replaces the target translation and applies.
    pub fn set_translation(&mut self, translation: Vec2) {
        self.set_target(Transform {
            translation,
            ..self.target
        });
    }

    /// Replaces the target zoom and applies.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.set_target(Transform { zoom, ..self.target });
    }

    /// Replaces the target rotation and applies.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.set_target(Transform {
            rotation,
            ..self.target
        });
    }

    /// Applies the current transform to the surface and notifies listeners.
    ///
    /// Without damping the current transform first snaps to the target.
    pub fn update_transform(&mut self) {
        if !self.config.is_damped() {
            self.current = self.target;
        }
        self.push_to_surface();
        self.notify();
    }

    /// Eases the current transform toward the target over `dt` seconds,
    /// then applies it.
    ///
    /// The current transform closes a `1 - e^(-dt / damping_strength)`
    /// fraction of the remaining distance. Without damping it snaps.
    pub fn update_damping(&mut self, dt: f64) {
        self.update_damping_without_apply(dt);
        self.update_transform();
    }

    /// Like [`Self::update_damping`], but leaves the surface and listeners
    /// untouched.
    ///
    /// Non-positive or non-finite `dt` leaves a damped transform where it is.
    pub fn update_damping_without_apply(&mut self, dt: f64) {
        if !self.config.is_damped() {
            self.current = self.target;
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let t = 1.0 - core::f64::consts::E.powf(-dt / self.config.damping_strength);
        self.current.lerp(&self.target, t);
    }

    /// Returns `true` once the current transform has reached the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Registers `listener`, to be called after every applied transform.
    pub fn add_listener(&mut self, listener: impl FnMut(&Self) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener. Returns `false` if `id` was not registered.
    ///
    /// The remaining listeners keep their relative order.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        match self.listeners.iter().position(|(other, _)| *other == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Clears the whole surface, independent of the current transform.
    pub fn clear_screen(&mut self) {
        surface::clear_screen(&mut self.surface);
    }

    /// Maps a viewport-space point to where it currently appears on the surface.
    #[must_use]
    pub fn viewport_to_surface(&self, point: Point) -> Point {
        self.current.apply(point)
    }

    /// Maps a surface-space point (for example a click) into viewport space.
    #[must_use]
    pub fn surface_to_viewport(&self, point: Point) -> Point {
        self.current.inverse().apply(point)
    }

    /// Axis-aligned viewport-space rectangle covering the whole surface.
    ///
    /// Under rotation this is the bounding box of the visible region, so it
    /// also covers some area that is not visible.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        let inverse = self.current.inverse();
        let surface = self.surface.size().to_rect();
        let corners = [
            Point::new(surface.x0, surface.y0),
            Point::new(surface.x1, surface.y0),
            Point::new(surface.x0, surface.y1),
            Point::new(surface.x1, surface.y1),
        ]
        .map(|corner| inverse.apply(corner));
        let first = Rect::from_points(corners[0], corners[0]);
        corners[1..]
            .iter()
            .fold(first, |rect, corner| rect.union_pt(*corner))
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            current: self.current,
            target: self.target,
            config: self.config,
            visible_rect: self.visible_rect(),
            listener_count: self.listeners.len(),
        }
    }

    fn push_to_surface(&mut self) {
        let Transform {
            translation,
            zoom,
            rotation,
        } = self.current;
        self.surface.reset_transform();
        self.surface.translate(translation);
        self.surface.rotate(rotation);
        self.surface.scale(zoom, zoom);
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        // Listeners only see `&Self`, so none can be added or removed while
        // the list is taken out.
        let mut listeners = core::mem::take(&mut self.listeners);
        for (_, listener) in &mut listeners {
            listener(self);
        }
        self.listeners = listeners;
    }
}

impl<S: Surface> GestureTarget for Viewport<S> {
    fn config(&self) -> &ViewportConfig {
        &self.config
    }

    fn surface_center(&self) -> Point {
        self.surface.size().to_rect().center()
    }

    fn apply(&mut self, delta: TransformDelta) {
        self.target.apply_delta(delta);
    }

    fn commit(&mut self) {
        self.update_transform();
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct ViewportDebugInfo {
    /// Transform applied to the surface.
    pub current: Transform,
    /// Transform being steered toward.
    pub target: Transform,
    /// Active configuration.
    pub config: ViewportConfig,
    /// Viewport-space bounds of the visible surface.
    pub visible_rect: Rect,
    /// Number of registered listeners.
    pub listener_count: usize,
}
