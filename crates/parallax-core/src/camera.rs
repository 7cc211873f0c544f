//! Perspective camera and the eased poses it moves between.
//!
//! The camera always looks straight down -Z at the plane sitting on the
//! origin; only its eye position moves.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: camera_rest_eye(),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
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
        Mat4::look_at_rh(self.eye, self.eye - Vec3::Z, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Move the eye a fraction `alpha` of the way toward `target`.
    pub fn ease_toward(&mut self, target: Vec3, alpha: f32) {
        self.eye = self.eye.lerp(target, alpha.clamp(0.0, 1.0));
    }
}

/// Pose the camera rests at while nobody is moving.
#[inline]
pub fn idle_pose() -> Vec3 {
    camera_rest_eye()
}

/// Pose derived from the live cursor while tracking. `depth` is the
/// strength-scaled z component (0 when the tracker has no depth).
#[inline]
pub fn active_pose(cursor_x: f32, cursor_y: f32, depth: f32) -> Vec3 {
    Vec3::new(
        cursor_x * CAMERA_ACTIVE_OFFSET_SCALE,
        cursor_y * CAMERA_ACTIVE_OFFSET_SCALE,
        depth * CAMERA_ACTIVE_DEPTH_SCALE + CAMERA_ACTIVE_DEPTH_BIAS,
    )
}

#[inline]
pub fn ease_alpha(dt_sec: f32, rate: f32) -> f32 {
    (dt_sec.max(0.0) * rate).min(1.0)
}
