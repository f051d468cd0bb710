// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Rect, Size, Vec2};
use render_space::{ConfigError, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Error returned when a canvas cannot be turned into a render space.
#[derive(Clone)]
pub enum SurfaceError {
    /// `getContext("2d")` returned no context, usually because the canvas
    /// already has a context of another kind.
    ContextUnavailable,
    /// The 2D context does not belong to an `HtmlCanvasElement`.
    DetachedContext,
    /// The viewport configuration was rejected.
    Config(ConfigError),
    /// A DOM call threw.
    Js(JsValue),
}

impl fmt::Debug for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextUnavailable => f.write_str("ContextUnavailable"),
            Self::DetachedContext => f.write_str("DetachedContext"),
            Self::Config(err) => f.debug_tuple("Config").field(err).finish(),
            Self::Js(value) => f.debug_tuple("Js").field(value).finish(),
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextUnavailable => f.write_str(
                "failed to get a 2d canvas context; if the canvas already has one, \
                 construct the surface from that context instead",
            ),
            Self::DetachedContext => f.write_str("2d context is not attached to a canvas element"),
            Self::Config(err) => write!(f, "invalid viewport configuration: {err}"),
            Self::Js(value) => write!(f, "DOM call failed: {value:?}"),
        }
    }
}

impl core::error::Error for SurfaceError {}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Js(value)
    }
}

impl From<ConfigError> for SurfaceError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// [`Surface`] drawing into a `CanvasRenderingContext2d`.
#[derive(Clone)]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    canvas: HtmlCanvasElement,
}

impl fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CanvasSurface { .. }")
    }
}

impl CanvasSurface {
    /// Creates a surface for a DOM canvas element, acquiring its 2D context.
    pub fn new_html_canvas(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(SurfaceError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx, canvas })
    }

    /// Creates a surface from an existing 2D context.
    pub fn from_context(ctx: CanvasRenderingContext2d) -> Result<Self, SurfaceError> {
        let canvas = ctx.canvas().ok_or(SurfaceError::DetachedContext)?;
        Ok(Self { ctx, canvas })
    }

    /// The 2D context, for issuing draw calls.
    #[must_use]
    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// The canvas element.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn reset_transform(&mut self) {
        let _ = self.ctx.reset_transform();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x, offset.y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.ctx.rotate(angle);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let _ = self.ctx.scale(sx, sy);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }
}
