//! Perspective camera and a damped orbit controller.
//!
//! The controller follows the usual orbit-control model: input accumulates
//! spherical and pan deltas, and each `update` applies a `damping_factor`
//! share of them, so motion eases out over the following frames.

use crate::constants::*;
use crate::picking::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::PI;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.6, 0.8, 2.2),
            target: ORBIT_TARGET,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Set the aspect ratio from a viewport size; degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// World-space ray through normalised device coordinates (`[-1, 1]`, y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        Ray::new(self.eye, far - self.eye)
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SavedPose {
    eye: Vec3,
    target: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitControls {
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_pan: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
    saved: SavedPose,
}

const MIN_POLAR: f32 = 1e-6;

impl OrbitControls {
    pub fn new(camera: &Camera) -> Self {
        Self {
            min_distance: 1.2,
            max_distance: 5.0,
            enable_pan: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            saved: SavedPose {
                eye: camera.eye,
                target: camera.target,
            },
        }
    }

    /// Remember the current pose as the one `reset` returns to.
    pub fn save_state(&mut self, camera: &Camera) {
        self.saved = SavedPose {
            eye: camera.eye,
            target: camera.target,
        };
    }

    /// Drag rotation; `dx`, `dy` in CSS pixels over a viewport `height` px tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, height: f32) {
        let h = height.max(1.0);
        self.delta_theta -= 2.0 * PI * dx / h * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / h * self.rotate_speed;
    }

    /// Wheel zoom in notches; positive values move away from the target.
    pub fn zoom(&mut self, notches: f32) {
        if notches.is_finite() {
            self.dolly(ORBIT_ZOOM_STEP.powf(-notches));
        }
    }

    /// Multiply the pending distance scale; below 1 moves toward the target.
    /// Used directly by pinch gestures.
    pub fn dolly(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale *= scale;
        }
    }

    /// Screen-space pan; ignored while panning is disabled.
    pub fn pan(&mut self, camera: &Camera, dx: f32, dy: f32, height: f32) {
        if !self.enable_pan {
            return;
        }
        let h = height.max(1.0);
        let offset = camera.eye - camera.target;
        let target_distance = offset.length() * (camera.fovy_radians / 2.0).tan();
        let view = camera.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        self.pan_offset += -right * (2.0 * dx * target_distance / h);
        self.pan_offset += up * (2.0 * dy * target_distance / h);
    }

    /// Apply one damped step of accumulated input to `camera`.
    pub fn update(&mut self, camera: &mut Camera) {
        let offset = camera.eye - camera.target;
        let mut radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        theta += self.delta_theta * self.damping_factor;
        phi += self.delta_phi * self.damping_factor;
        phi = phi.clamp(MIN_POLAR, PI - MIN_POLAR);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.target += self.pan_offset * self.damping_factor;
        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = camera.target + offset;

        let keep = 1.0 - self.damping_factor;
        self.delta_theta *= keep;
        self.delta_phi *= keep;
        self.pan_offset *= keep;
        self.scale = 1.0;
    }

    /// Return the camera to the saved pose and drop pending motion.
    pub fn reset(&mut self, camera: &mut Camera) {
        camera.eye = self.saved.eye;
        camera.target = self.saved.target;
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;
    }
}
