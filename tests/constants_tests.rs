// Host-side tests for frontend constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn dom_ids_match_the_page() {
    assert_eq!(CANVAS_ID, "c");
    assert_eq!(OPEN_BUTTON_ID, "openPack");
    assert_eq!(RESET_BUTTON_ID, "reset");
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn key_light_outshines_rim_and_ambient() {
    assert!(KEY_LIGHT_INTENSITY > RIM_LIGHT_INTENSITY);
    assert!(RIM_LIGHT_INTENSITY > AMBIENT_INTENSITY);
    assert!(AMBIENT_INTENSITY > 0.0);
}

#[test]
fn lights_sit_on_opposite_sides() {
    // Key in front-right, rim behind-left
    assert!(KEY_LIGHT_POS[0] > 0.0 && RIM_LIGHT_POS[0] < 0.0);
    assert!(KEY_LIGHT_POS[2] > 0.0 && RIM_LIGHT_POS[2] < 0.0);
}

#[test]
fn face_textures_are_srgb() {
    assert!(TEXTURE_FORMAT.is_srgb());
    assert!(!DEPTH_FORMAT.has_color_aspect());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn texture_limits_are_sane() {
    assert!(MAX_TEXTURE_EDGE.is_power_of_two());
    assert!((1..=16).contains(&MAX_ANISOTROPY));
    assert!(WHEEL_NOTCH_PX > 0.0);
}

#[test]
fn msaa_uses_a_webgpu_sample_count() {
    // WebGPU only guarantees 1 and 4
    assert_eq!(MSAA_SAMPLES, 4);
}
