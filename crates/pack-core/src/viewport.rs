//! Responsive layout: mobile vs desktop parameters for camera, controls,
//! pack scale and pixel density.

use glam::Vec3;

pub const MOBILE_BREAKPOINT_PX: f32 = 768.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportClass {
    Mobile,
    Desktop,
}

impl ViewportClass {
    /// Classify a CSS viewport width; non-finite widths count as desktop.
    pub fn from_width(width: f32) -> Self {
        if width.is_finite() && width <= MOBILE_BREAKPOINT_PX {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            ViewportClass::Mobile => Layout {
                camera_position: Vec3::new(0.35, 1.05, 2.9),
                min_distance: 1.25,
                max_distance: 3.8,
                enable_pan: false,
                pack_scale: 0.95,
                max_pixel_ratio: 1.6,
            },
            ViewportClass::Desktop => Layout {
                camera_position: Vec3::new(0.6, 0.8, 2.2),
                min_distance: 1.2,
                max_distance: 5.0,
                enable_pan: true,
                pack_scale: 1.06,
                max_pixel_ratio: 2.0,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub camera_position: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_pan: bool,
    pub pack_scale: f32,
    pub max_pixel_ratio: f32,
}

/// Device pixel ratio capped for `class`; bad input falls back to 1.
pub fn pixel_ratio(device_pixel_ratio: f64, class: ViewportClass) -> f32 {
    let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio as f32
    } else {
        1.0
    };
    dpr.min(class.layout().max_pixel_ratio)
}

/// Current viewport in CSS pixels, clamped to at least 1x1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub class: ViewportClass,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        let width = clamp(width);
        let height = clamp(height);
        Self {
            width,
            height,
            class: ViewportClass::from_width(width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive_for_mobile() {
        assert_eq!(ViewportClass::from_width(768.0), ViewportClass::Mobile);
        assert_eq!(ViewportClass::from_width(769.0), ViewportClass::Desktop);
        assert_eq!(ViewportClass::from_width(320.0), ViewportClass::Mobile);
    }

    #[test]
    fn pixel_ratio_is_capped_per_class() {
        assert_eq!(pixel_ratio(3.0, ViewportClass::Mobile), 1.6);
        assert_eq!(pixel_ratio(3.0, ViewportClass::Desktop), 2.0);
        assert_eq!(pixel_ratio(1.25, ViewportClass::Desktop), 1.25);
        assert_eq!(pixel_ratio(f64::NAN, ViewportClass::Desktop), 1.0);
    }

    #[test]
    fn zero_sized_viewport_is_clamped() {
        let vp = Viewport::new(0.0, -5.0);
        assert_eq!((vp.width, vp.height), (1.0, 1.0));
        assert_eq!(vp.class, ViewportClass::Mobile);
    }
}
