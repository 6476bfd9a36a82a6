// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn primary_button_rotates_and_modifier_pans() {
    assert_eq!(drag_mode_for(0, false), Some(DragMode::Rotate));
    assert_eq!(drag_mode_for(0, true), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(2, false), Some(DragMode::Pan));
}

#[test]
fn middle_and_extra_buttons_do_not_drag() {
    assert_eq!(drag_mode_for(1, false), None);
    assert_eq!(drag_mode_for(3, true), None);
}

#[test]
fn drag_reports_deltas_between_moves() {
    let mut drag = DragState::default();
    drag.begin(Some(DragMode::Rotate), 100.0, 50.0);
    assert_eq!(drag.moved(110.0, 45.0), Some((DragMode::Rotate, 10.0, -5.0)));
    assert_eq!(drag.moved(110.0, 45.0), Some((DragMode::Rotate, 0.0, 0.0)));
}

#[test]
fn moves_without_active_drag_are_ignored() {
    let mut drag = DragState::default();
    assert_eq!(drag.moved(10.0, 10.0), None);

    drag.begin(Some(DragMode::Pan), 0.0, 0.0);
    drag.end();
    assert_eq!(drag.moved(10.0, 10.0), None);
}

#[test]
fn non_finite_pointer_does_not_corrupt_drag() {
    let mut drag = DragState::default();
    drag.begin(Some(DragMode::Rotate), 5.0, 5.0);
    assert_eq!(drag.moved(f32::NAN, 5.0), None);
    assert_eq!(drag.moved(6.0, 5.0), Some((DragMode::Rotate, 1.0, 0.0)));
}

#[test]
fn wheel_line_and_page_modes_scale_to_pixels() {
    assert_eq!(wheel_delta_px(3.0, 0), 3.0);
    assert_eq!(wheel_delta_px(3.0, 1), 48.0);
    assert_eq!(wheel_delta_px(-1.0, 2), -800.0);
}

#[test]
fn wheel_notches_are_signed_and_clamped() {
    assert_eq!(wheel_notches(100.0, 100.0), 1.0);
    assert_eq!(wheel_notches(-50.0, 100.0), -0.5);
    assert_eq!(wheel_notches(10_000.0, 100.0), 3.0);
    assert_eq!(wheel_notches(f64::NAN, 100.0), 0.0);
    assert_eq!(wheel_notches(100.0, 0.0), 0.0);
}

#[test]
fn single_finger_is_not_a_pinch() {
    let mut touch = TouchGesture::default();
    touch.down(1, 100.0, 100.0);
    assert!(!touch.is_pinching());
    assert_eq!(touch.moved(1, 120.0, 100.0), None);
}

#[test]
fn spreading_fingers_zooms_in_and_midpoint_pans() {
    let mut touch = TouchGesture::default();
    touch.down(1, 100.0, 100.0);
    touch.down(2, 200.0, 100.0);
    assert!(touch.is_pinching());

    // Distance 100 -> 200, midpoint 150 -> 200
    let step = touch.moved(2, 300.0, 100.0).unwrap();
    assert!((step.scale - 0.5).abs() < 1e-6);
    assert_eq!(step.pan, [50.0, 0.0]);

    // Pinching back in zooms out
    let step = touch.moved(2, 200.0, 100.0).unwrap();
    assert!((step.scale - 2.0).abs() < 1e-6);
}

#[test]
fn lifting_a_finger_ends_the_pinch() {
    let mut touch = TouchGesture::default();
    touch.down(1, 0.0, 0.0);
    touch.down(2, 50.0, 0.0);
    touch.down(3, 90.0, 90.0);
    touch.up(2);
    assert!(!touch.is_pinching());
    assert_eq!(touch.moved(1, 10.0, 0.0), None);
}

#[test]
fn coincident_fingers_do_not_produce_infinite_scale() {
    let mut touch = TouchGesture::default();
    touch.down(1, 10.0, 10.0);
    touch.down(2, 10.0, 10.0);
    let step = touch.moved(2, 40.0, 10.0).unwrap();
    assert_eq!(step.scale, 1.0);
    assert!(step.pan[0].is_finite());
}
