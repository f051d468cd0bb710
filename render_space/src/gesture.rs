// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and wheel gesture interpretation.
//!
//! ## Usage
//!
//! 1) Forward pointer-down, pointer-move, pointer-up/cancel and wheel events
//!    from one surface into a [`GestureInterpreter`], in delivery order and
//!    in a single surface-local coordinate frame.
//! 2) Pass the [`GestureTarget`] being steered (normally a [`crate::Viewport`])
//!    to the move and wheel handlers.
//!
//! The interpreter dispatches on how many pointers are down:
//!
//! - One pointer: a primary-button drag pans; a secondary-button drag rotates
//!   around the surface center by `rotation_sensitivity` radians per pixel of
//!   horizontal motion.
//! - Two pointers: the moving pointer is paired with the other one (the
//!   anchor) for a combined pan, pinch-zoom and twist around their midpoint.
//! - More than two: positions are tracked, nothing is applied.
//!
//! The anchor is looked up afresh on every move. When a pointer is added or
//! lifted mid-gesture the pairing changes with it, which can make the view
//! jump by the distance the lifted pointer had travelled.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use render_space::{GestureInterpreter, PointerButton, PointerId, RecordingSurface, Viewport};
//!
//! let mut viewport = Viewport::new(RecordingSurface::new(Size::new(800.0, 600.0)));
//! let mut gestures = GestureInterpreter::new();
//!
//! gestures.pointer_down(PointerId(1), Point::new(10.0, 10.0), PointerButton::Primary);
//! gestures.pointer_move(PointerId(1), Point::new(25.0, 40.0), &mut viewport);
//! gestures.pointer_up(PointerId(1));
//!
//! assert_eq!(viewport.transform().translation, kurbo::Vec2::new(15.0, 30.0));
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use hashbrown::HashMap;

use crate::ViewportConfig;
use crate::transform::{TransformDelta, signed_angle};

/// Opaque identifier distinguishing simultaneous pointers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub i64);

/// Button held when a pointer went down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch.
    #[default]
    Primary,
    /// Middle mouse button.
    Auxiliary,
    /// Right mouse button.
    Secondary,
    /// Any other button, by its DOM-style index.
    Other(i16),
}

impl PointerButton {
    /// Maps a DOM `MouseEvent.button` index to a button.
    #[must_use]
    pub fn from_dom_index(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

/// Tracked state of one active pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    /// Last reported position in surface space.
    pub position: Point,
    /// Button held when the pointer went down.
    pub button: PointerButton,
}

/// Which rule a pointer move was interpreted by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// A lone pointer dragged with the given button.
    Drag(PointerButton),
    /// One of exactly two pointers moved.
    Pinch,
}

/// Receiver of the deltas a [`GestureInterpreter`] produces.
///
/// Deltas go to the target transform; [`GestureTarget::commit`] is called
/// once after each interpreted event so that the implementor can apply the
/// result.
pub trait GestureTarget {
    /// Gesture switches and sensitivities to honor.
    fn config(&self) -> &ViewportConfig;

    /// Pivot used for single-pointer drag rotation, in surface space.
    fn surface_center(&self) -> Point;

    /// Applies one delta to the target transform.
    fn apply(&mut self, delta: TransformDelta);

    /// Called after the deltas for one event have been applied.
    fn commit(&mut self);
}

/// Turns a stream of pointer and wheel events into transform deltas.
///
/// One interpreter serves one surface. It owns nothing but the map of
/// currently pressed pointers, so it can be reset with [`Self::clear`] at any
/// time (for example when the surface loses focus).
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    pointers: HashMap<PointerId, PointerState>,
}

impl GestureInterpreter {
    /// Creates an interpreter with no active pointers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pointers: HashMap::new(),
        }
    }

    /// Starts tracking `id` at `position`.
    ///
    /// A second down for an id that is already tracked replaces its state.
    pub fn pointer_down(&mut self, id: PointerId, position: Point, button: PointerButton) {
        self.pointers.insert(id, PointerState { position, button });
        log::trace!(
            "pointer {id:?} down at {position:?} with {button:?} ({} active)",
            self.pointers.len()
        );
    }

    /// Stops tracking `id`. Unknown ids are ignored.
    pub fn pointer_up(&mut self, id: PointerId) {
        if self.pointers.remove(&id).is_some() {
            log::trace!("pointer {id:?} up ({} active)", self.pointers.len());
        }
    }

    /// Handles a cancelled pointer the same way as a lifted one.
    pub fn pointer_cancel(&mut self, id: PointerId) {
        self.pointer_up(id);
    }

    /// Records a move of `id` to `position` and applies the matching gesture.
    ///
    /// Returns the rule that fired, or `None` if the pointer is not tracked
    /// or more than two pointers are down. When a rule fires the target is
    /// committed once.
    pub fn pointer_move<T: GestureTarget + ?Sized>(
        &mut self,
        id: PointerId,
        position: Point,
        target: &mut T,
    ) -> Option<Gesture> {
        let state = self.pointers.get_mut(&id)?;
        let last = state.position;
        state.position = position;
        let button = state.button;

        match self.pointers.len() {
            1 => {
                drag(target, button, last, position);
                target.commit();
                Some(Gesture::Drag(button))
            }
            2 => {
                let Some(anchor) = self
                    .pointers
                    .iter()
                    .find_map(|(other, state)| (*other != id).then_some(state.position))
                else {
                    unreachable!("two tracked pointers must include one other than {id:?}");
                };
                pinch(target, last, position, anchor);
                target.commit();
                Some(Gesture::Pinch)
            }
            _ => None,
        }
    }

    /// Zooms about `position` by `scroll_sensitivity ^ -delta_y`.
    ///
    /// Positive `delta_y` (scrolling down) zooms out. Wheel zoom does not
    /// depend on the tracked pointers. Returns `true` if the target was
    /// committed.
    pub fn wheel<T: GestureTarget + ?Sized>(
        &self,
        position: Point,
        delta_y: f64,
        target: &mut T,
    ) -> bool {
        let config = *target.config();
        if !config.zooming {
            return false;
        }
        let factor = config.scroll_sensitivity.powf(-delta_y);
        target.apply(TransformDelta::ZoomInto {
            pivot: position,
            factor,
        });
        target.commit();
        true
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Returns the tracked state of `id`, if it is down.
    #[must_use]
    pub fn pointer(&self, id: PointerId) -> Option<&PointerState> {
        self.pointers.get(&id)
    }

    /// Forgets every active pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}

fn drag<T: GestureTarget + ?Sized>(
    target: &mut T,
    button: PointerButton,
    last: Point,
    moved: Point,
) {
    let config = *target.config();
    match button {
        PointerButton::Secondary if config.rotating => {
            let pivot = target.surface_center();
            target.apply(TransformDelta::RotateAround {
                pivot,
                angle: config.rotation_sensitivity * (moved.x - last.x),
            });
        }
        PointerButton::Primary if config.panning => {
            target.apply(TransformDelta::Translate(moved - last));
        }
        _ => {}
    }
}

fn pinch<T: GestureTarget + ?Sized>(target: &mut T, last: Point, moved: Point, anchor: Point) {
    let config = *target.config();
    let center = moved.midpoint(anchor);

    if config.panning {
        target.apply(TransformDelta::Translate((moved - last) / 2.0));
    }
    if config.zooming {
        target.apply(TransformDelta::ZoomInto {
            pivot: center,
            factor: pinch_factor(last, moved, anchor),
        });
    }
    if config.rotating {
        target.apply(TransformDelta::RotateAround {
            pivot: center,
            angle: signed_angle(last - anchor, moved - anchor),
        });
    }
}

/// Ratio of the new to the previous pointer separation.
///
/// Coincident previous positions give `1.0` instead of dividing by zero.
fn pinch_factor(last: Point, moved: Point, anchor: Point) -> f64 {
    let last_distance = last.distance(anchor);
    let factor = moved.distance(anchor) / last_distance;
    if last_distance > 0.0 && factor.is_finite() && factor > 0.0 {
        factor
    } else {
        log::debug!(
            "degenerate pinch: previous separation {last_distance}, new {}; zoom skipped",
            moved.distance(anchor)
        );
        1.0
    }
}
