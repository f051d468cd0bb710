// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use kurbo::Point;
use render_space::{GestureInterpreter, PointerButton, Viewport, ViewportConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    AddEventListenerOptions, Event, HtmlCanvasElement, MouseEvent, PointerEvent, WheelEvent,
};

use crate::pointer_id_from_dom;
use crate::surface::{CanvasSurface, SurfaceError};

type SharedViewport = Rc<RefCell<Viewport<CanvasSurface>>>;
type SharedGestures = Rc<RefCell<GestureInterpreter>>;
type EventClosure = Closure<dyn FnMut(Event)>;

/// A canvas element wired to a [`Viewport`] through DOM input events.
///
/// The viewport is shared so the host can drive it from its frame loop while
/// the event listeners hold their own handles.
pub struct CanvasRenderSpace {
    canvas: HtmlCanvasElement,
    viewport: SharedViewport,
    gestures: SharedGestures,
    listeners: Vec<(&'static str, EventClosure)>,
}

impl fmt::Debug for CanvasRenderSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasRenderSpace")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl CanvasRenderSpace {
    /// Attaches to `canvas` with the default configuration.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        Self::with_config(canvas, ViewportConfig::default())
    }

    /// Attaches to `canvas`, acquiring its 2D context and installing listeners.
    pub fn with_config(
        canvas: HtmlCanvasElement,
        config: ViewportConfig,
    ) -> Result<Self, SurfaceError> {
        let surface = CanvasSurface::new_html_canvas(canvas.clone())?;
        let viewport = Viewport::try_with_config(surface, config)?;
        canvas.style().set_property("touch-action", "none")?;

        let mut space = Self {
            canvas,
            viewport: Rc::new(RefCell::new(viewport)),
            gestures: Rc::new(RefCell::new(GestureInterpreter::new())),
            listeners: Vec::new(),
        };
        space.install()?;
        log::debug!("render space attached to canvas");
        Ok(space)
    }

    /// Shared handle to the viewport.
    #[must_use]
    pub fn viewport(&self) -> &Rc<RefCell<Viewport<CanvasSurface>>> {
        &self.viewport
    }

    /// The canvas element events are read from.
    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Number of pointers currently pressed on the canvas.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.gestures.try_borrow().map_or(0, |g| g.pointer_count())
    }

    fn install(&mut self) -> Result<(), SurfaceError> {
        self.listen("contextmenu", Box::new(|event: Event| event.prevent_default()))?;

        let gestures = Rc::clone(&self.gestures);
        let canvas = self.canvas.clone();
        self.listen(
            "pointerdown",
            Box::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let _ = canvas.set_pointer_capture(event.pointer_id());
                let Ok(mut gestures) = gestures.try_borrow_mut() else {
                    log::warn!("pointerdown dropped: gesture state busy");
                    return;
                };
                gestures.pointer_down(
                    pointer_id_from_dom(event.pointer_id()),
                    offset(event),
                    PointerButton::from_dom_index(event.button()),
                );
            }),
        )?;

        let gestures = Rc::clone(&self.gestures);
        let viewport = Rc::clone(&self.viewport);
        self.listen(
            "pointermove",
            Box::new(move |event: Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let (Ok(mut gestures), Ok(mut viewport)) =
                    (gestures.try_borrow_mut(), viewport.try_borrow_mut())
                else {
                    log::warn!("pointermove dropped: viewport busy");
                    return;
                };
                gestures.pointer_move(
                    pointer_id_from_dom(event.pointer_id()),
                    offset(event),
                    &mut *viewport,
                );
            }),
        )?;

        for kind in ["pointerup", "pointercancel"] {
            let gestures = Rc::clone(&self.gestures);
            let cancel = kind == "pointercancel";
            self.listen(
                kind,
                Box::new(move |event: Event| {
                    let Some(event) = event.dyn_ref::<PointerEvent>() else {
                        return;
                    };
                    let Ok(mut gestures) = gestures.try_borrow_mut() else {
                        log::warn!("{} dropped: gesture state busy", event.type_());
                        return;
                    };
                    let id = pointer_id_from_dom(event.pointer_id());
                    if cancel {
                        gestures.pointer_cancel(id);
                    } else {
                        gestures.pointer_up(id);
                    }
                }),
            )?;
        }

        let gestures = Rc::clone(&self.gestures);
        let viewport = Rc::clone(&self.viewport);
        let wheel = EventClosure::wrap(Box::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                return;
            };
            let (Ok(gestures), Ok(mut viewport)) =
                (gestures.try_borrow(), viewport.try_borrow_mut())
            else {
                log::warn!("wheel dropped: viewport busy");
                return;
            };
            if gestures.wheel(offset(event), event.delta_y(), &mut *viewport) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        self.canvas
            .add_event_listener_with_callback_and_add_event_listener_options(
                "wheel",
                wheel.as_ref().unchecked_ref(),
                &options,
            )?;
        self.listeners.push(("wheel", wheel));
        Ok(())
    }

    fn listen(
        &mut self,
        kind: &'static str,
        handler: Box<dyn FnMut(Event)>,
    ) -> Result<(), SurfaceError> {
        let closure = EventClosure::wrap(handler);
        self.canvas
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push((kind, closure));
        Ok(())
    }
}

impl Drop for CanvasRenderSpace {
    fn drop(&mut self) {
        for (kind, closure) in self.listeners.drain(..) {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        let _ = self.canvas.style().remove_property("touch-action");
        log::debug!("render space detached from canvas");
    }
}

fn offset(event: &MouseEvent) -> Point {
    Point::new(f64::from(event.offset_x()), f64::from(event.offset_y()))
}
