// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for gesture handling through a `Viewport`.
//!
//! These drive `GestureInterpreter` with synthetic pointer and wheel events
//! and check the resulting target and current transforms.

use core::f64::consts::FRAC_PI_2;

use kurbo::{Point, Size, Vec2};
use render_space::{
    Gesture, GestureInterpreter, PointerButton, PointerId, RecordingSurface, Transform, Viewport,
    ViewportConfig,
};

const EPS: f64 = 1e-9;

fn viewport(config: ViewportConfig) -> Viewport<RecordingSurface> {
    Viewport::with_config(RecordingSurface::new(Size::new(800.0, 600.0)), config)
}

fn assert_near(a: f64, b: f64) {
    assert!((a - b).abs() < EPS, "{a} != {b}");
}

#[test]
fn primary_drag_pans_by_motion() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(7), Point::new(100.0, 100.0), PointerButton::Primary);
    let fired = gestures.pointer_move(PointerId(7), Point::new(110.0, 95.0), &mut vp);
    assert_eq!(fired, Some(Gesture::Drag(PointerButton::Primary)));
    gestures.pointer_move(PointerId(7), Point::new(130.0, 90.0), &mut vp);

    assert_eq!(vp.transform().translation, Vec2::new(30.0, -10.0));
    assert_eq!(vp.transform().zoom, 1.0);
}

#[test]
fn secondary_drag_rotates_by_horizontal_motion() {
    let config = ViewportConfig::default().with_rotation_sensitivity(0.01);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(50.0, 50.0), PointerButton::Secondary);
    gestures.pointer_move(PointerId(1), Point::new(60.0, 80.0), &mut vp);

    assert_near(vp.transform().rotation, 0.1);
    // Rotation is about the surface center, which stays put.
    let center = Point::new(400.0, 300.0);
    let world = Transform::IDENTITY.inverse().apply(center);
    assert!((vp.viewport_to_surface(world) - center).hypot() < EPS);
}

#[test]
fn disabled_gestures_do_nothing() {
    let config = ViewportConfig::default().with_gestures(false, false, false);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::ZERO, PointerButton::Primary);
    gestures.pointer_move(PointerId(1), Point::new(10.0, 10.0), &mut vp);
    gestures.pointer_up(PointerId(1));

    gestures.pointer_down(PointerId(2), Point::ZERO, PointerButton::Secondary);
    gestures.pointer_move(PointerId(2), Point::new(10.0, 10.0), &mut vp);
    gestures.pointer_up(PointerId(2));

    assert!(!gestures.wheel(Point::new(5.0, 5.0), -3.0, &mut vp));
    assert_eq!(vp.transform(), Transform::IDENTITY);
}

#[test]
fn auxiliary_drag_is_ignored() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::ZERO, PointerButton::Auxiliary);
    let fired = gestures.pointer_move(PointerId(1), Point::new(40.0, 0.0), &mut vp);
    assert_eq!(fired, Some(Gesture::Drag(PointerButton::Auxiliary)));
    assert_eq!(vp.transform(), Transform::IDENTITY);
}

#[test]
fn untracked_pointer_moves_are_ignored() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    assert_eq!(
        gestures.pointer_move(PointerId(3), Point::new(10.0, 0.0), &mut vp),
        None
    );
    gestures.pointer_down(PointerId(3), Point::ZERO, PointerButton::Primary);
    gestures.pointer_up(PointerId(3));
    assert_eq!(
        gestures.pointer_move(PointerId(3), Point::new(20.0, 0.0), &mut vp),
        None
    );
    assert_eq!(vp.transform(), Transform::IDENTITY);
}

#[test]
fn stationary_second_pointer_leaves_transform_unchanged() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(0.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
    let fired = gestures.pointer_move(PointerId(1), Point::new(0.0, 0.0), &mut vp);

    assert_eq!(fired, Some(Gesture::Pinch));
    let t = vp.transform();
    assert_eq!(t.translation, Vec2::ZERO);
    assert_eq!(t.zoom, 1.0);
    assert_eq!(t.rotation, 0.0);
}

#[test]
fn pinch_spread_zooms_about_midpoint() {
    let config = ViewportConfig::default().with_gestures(false, true, false);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(100.0, 100.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(200.0, 100.0), PointerButton::Primary);
    gestures.pointer_move(PointerId(2), Point::new(300.0, 100.0), &mut vp);

    assert_near(vp.transform().zoom, 2.0);
    // Pivot is the midpoint of the moved pointer and the anchor.
    let pivot = Point::new(200.0, 100.0);
    assert!((vp.viewport_to_surface(pivot) - pivot).hypot() < EPS);
}

#[test]
fn pinch_twist_rotates_by_signed_angle() {
    let config = ViewportConfig::default().with_gestures(false, false, true);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(100.0, 100.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(200.0, 100.0), PointerButton::Primary);
    // Quarter turn of the mover around the anchor, in surface (y-down) space.
    gestures.pointer_move(PointerId(2), Point::new(100.0, 200.0), &mut vp);

    assert_near(vp.transform().rotation, FRAC_PI_2);
    assert_near(vp.transform().zoom, 1.0);
}

#[test]
fn pinch_pan_moves_half_the_motion() {
    let config = ViewportConfig::default().with_gestures(true, false, false);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(0.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
    gestures.pointer_move(PointerId(1), Point::new(20.0, 10.0), &mut vp);
    gestures.pointer_move(PointerId(2), Point::new(120.0, 10.0), &mut vp);

    assert_eq!(vp.transform().translation, Vec2::new(20.0, 10.0));
}

#[test]
fn coincident_pointers_do_not_poison_transform() {
    let config = ViewportConfig::default().with_gestures(false, true, true);
    let mut vp = viewport(config);
    vp.set_target(Transform::new(Vec2::new(5.0, 6.0), 1.5, 0.2));
    let before = vp.transform();
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(50.0, 50.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(50.0, 50.0), PointerButton::Primary);
    gestures.pointer_move(PointerId(2), Point::new(80.0, 90.0), &mut vp);

    let after = vp.transform();
    assert!(after.is_finite());
    assert_eq!(after, before);
}

#[test]
fn coincident_pointers_with_panning_only_pan() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(50.0, 50.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(50.0, 50.0), PointerButton::Primary);
    gestures.pointer_move(PointerId(2), Point::new(60.0, 50.0), &mut vp);

    let t = vp.transform();
    assert!(t.is_finite());
    assert_eq!(t.zoom, 1.0);
    assert_eq!(t.rotation, 0.0);
    assert_eq!(t.translation, Vec2::new(5.0, 0.0));
}

#[test]
fn third_pointer_suspends_gestures() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(0.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(3), Point::new(50.0, 80.0), PointerButton::Primary);
    assert_eq!(gestures.pointer_count(), 3);

    let fired = gestures.pointer_move(PointerId(3), Point::new(400.0, 400.0), &mut vp);
    assert_eq!(fired, None);
    assert_eq!(vp.transform(), Transform::IDENTITY);
    // Position is still recorded for when the count drops again.
    assert_eq!(
        gestures.pointer(PointerId(3)).map(|p| p.position),
        Some(Point::new(400.0, 400.0))
    );

    // After lifting one, the remaining pair re-anchors on the next move.
    gestures.pointer_up(PointerId(1));
    let fired = gestures.pointer_move(PointerId(3), Point::new(400.0, 400.0), &mut vp);
    assert_eq!(fired, Some(Gesture::Pinch));
    assert_eq!(vp.transform(), Transform::IDENTITY);
}

#[test]
fn lifting_to_one_pointer_resumes_drag() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(0.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
    gestures.pointer_cancel(PointerId(2));
    assert_eq!(gestures.pointer_count(), 1);

    let fired = gestures.pointer_move(PointerId(1), Point::new(10.0, 0.0), &mut vp);
    assert_eq!(fired, Some(Gesture::Drag(PointerButton::Primary)));
    assert_eq!(vp.transform().translation, Vec2::new(10.0, 0.0));
}

#[test]
fn wheel_zooms_about_cursor() {
    let config = ViewportConfig::default().with_scroll_sensitivity(2.0);
    let mut vp = viewport(config);
    let gestures = GestureInterpreter::new();
    let cursor = Point::new(100.0, 100.0);

    // Scrolling up (negative delta) zooms in.
    assert!(gestures.wheel(cursor, -1.0, &mut vp));
    assert_near(vp.transform().zoom, 2.0);
    assert_eq!(vp.transform().translation, Vec2::new(-100.0, -100.0));

    // Scrolling down by the same amount undoes it.
    gestures.wheel(cursor, 1.0, &mut vp);
    assert_near(vp.transform().zoom, 1.0);
    assert!(vp.transform().translation.hypot() < EPS);
}

#[test]
fn wheel_is_monotonic_in_delta() {
    let gestures = GestureInterpreter::new();
    let mut zooms = [0.0; 3];
    for (zoom, delta) in zooms.iter_mut().zip([-50.0, 0.0, 50.0]) {
        let mut vp = viewport(ViewportConfig::default());
        gestures.wheel(Point::ZERO, delta, &mut vp);
        *zoom = vp.transform().zoom;
    }
    assert!(zooms[0] > zooms[1] && zooms[1] > zooms[2]);
}

#[test]
fn extreme_wheel_deltas_keep_zoom_positive() {
    let mut vp = viewport(ViewportConfig::default());
    let gestures = GestureInterpreter::new();
    let cursor = Point::new(100.0, 100.0);

    // The first notch alone brings the zoom near the smallest normal float.
    gestures.wheel(cursor, 70_000.0, &mut vp);
    gestures.wheel(cursor, 70_000.0, &mut vp);
    let t = vp.transform();
    assert!(t.is_valid(), "{t:?}");
    assert!(vp.surface_to_viewport(Point::new(400.0, 300.0)).is_finite());
    assert!(vp.visible_rect().is_finite());

    // Still able to zoom back.
    gestures.wheel(cursor, -70_000.0, &mut vp);
    assert!((vp.transform().zoom - 1.0).abs() < 1e-6);

    for _ in 0..8 {
        gestures.wheel(cursor, -70_000.0, &mut vp);
    }
    assert!(vp.transform().is_valid(), "{:?}", vp.transform());
}

#[test]
fn repeated_pinch_collapse_keeps_zoom_positive() {
    let mut vp = viewport(ViewportConfig::default());
    let mut gestures = GestureInterpreter::new();
    let anchor = Point::new(0.0, 0.0);

    gestures.pointer_down(PointerId(1), anchor, PointerButton::Primary);
    for _ in 0..3 {
        gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
        gestures.pointer_move(PointerId(2), Point::new(1e-300, 0.0), &mut vp);
        gestures.pointer_up(PointerId(2));

        let t = vp.transform();
        assert!(t.is_valid(), "{t:?}");
        assert!(t.inverse().is_valid());
    }
}

#[test]
fn damped_gestures_steer_target_until_ticked() {
    let config = ViewportConfig::default().with_damping_strength(0.1);
    let mut vp = viewport(config);
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::ZERO, PointerButton::Primary);
    gestures.pointer_move(PointerId(1), Point::new(50.0, 0.0), &mut vp);

    assert_eq!(vp.transform(), Transform::IDENTITY);
    assert_eq!(vp.target_transform().translation, Vec2::new(50.0, 0.0));

    let mut previous = 0.0;
    for _ in 0..30 {
        vp.update_damping(1.0 / 60.0);
        let x = vp.transform().translation.x;
        assert!(x > previous && x <= 50.0);
        previous = x;
    }
    for _ in 0..600 {
        vp.update_damping(1.0 / 60.0);
    }
    assert!((vp.transform().translation.x - 50.0).abs() < 1e-6);
}

#[test]
fn each_interpreted_move_notifies_once() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mut vp = viewport(ViewportConfig::default());
    let calls = Rc::new(Cell::new(0));
    let seen = calls.clone();
    vp.add_listener(move |_| seen.set(seen.get() + 1));
    let mut gestures = GestureInterpreter::new();

    gestures.pointer_down(PointerId(1), Point::new(0.0, 0.0), PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::new(100.0, 0.0), PointerButton::Primary);
    gestures.pointer_move(PointerId(2), Point::new(150.0, 20.0), &mut vp);
    assert_eq!(calls.get(), 1);

    gestures.wheel(Point::ZERO, 1.0, &mut vp);
    assert_eq!(calls.get(), 2);
}

#[test]
fn clear_forgets_pointers() {
    let mut gestures = GestureInterpreter::new();
    gestures.pointer_down(PointerId(1), Point::ZERO, PointerButton::Primary);
    gestures.pointer_down(PointerId(2), Point::ZERO, PointerButton::Secondary);
    gestures.clear();
    assert_eq!(gestures.pointer_count(), 0);
    assert!(gestures.pointer(PointerId(1)).is_none());
}
