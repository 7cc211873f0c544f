use glam::Vec3;

// Shared tuning constants used by both web and native frontends.

// Smoothing and activity
pub const SMOOTHING_RATE_PER_SEC: f32 = 5.0; // first-order low-pass rate for the cursor
pub const QUIET_PERIOD_SEC: f64 = 1.5; // static time before the viewer counts as idle
pub const ACTIVITY_EPSILON: f32 = 1e-4; // smallest smoothed-X change that counts as movement
pub const ROTATION_INTERVAL_SEC: f64 = 5.0; // idle time between automatic image changes

// Settings bounds
pub const DEFAULT_THRESHOLD: [f32; 2] = [160.0, 160.0];
pub const DEFAULT_STRENGTH: f32 = 0.2;
pub const DEFAULT_IMAGE_KEY: &str = "1";
pub const MIN_THRESHOLD: f32 = 0.001; // thresholds divide the offset; never reach zero
pub const MAX_THRESHOLD: f32 = 1000.0;
pub const MAX_STRENGTH: f32 = 3.0;
pub const THRESHOLD_STEP: f32 = 1.0; // keyboard nudge
pub const STRENGTH_STEP: f32 = 0.1; // keyboard nudge

// Plane and viewport
pub const PLANE_EXTENT: f32 = 1.15; // world-space height of the plane when height-constrained
pub const MAX_PIXEL_RATIO: f64 = 2.0; // cap on device pixel density

// Camera rig
pub const CAMERA_FOVY_DEG: f32 = 120.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_REST_EYE: [f32; 3] = [0.0, 0.0, 0.27]; // idle pose
pub const CAMERA_IDLE_EASE_RATE: f32 = 2.0; // alpha = min(dt * rate, 1)
pub const CAMERA_ACTIVE_EASE_RATE: f32 = 4.0;
pub const CAMERA_ACTIVE_OFFSET_SCALE: f32 = 0.02; // raw cursor -> eye x/y
pub const CAMERA_ACTIVE_DEPTH_SCALE: f32 = 0.03; // strength-scaled cursor z -> eye z
pub const CAMERA_ACTIVE_DEPTH_BIAS: f32 = 0.2;

// Head tracking
pub const HEAD_SCALE: [f32; 3] = [20.0, 10.0, 2.2]; // raw head pose -> cursor signal
pub const TRACKER_SMOOTH_DIST: f32 = 0.15;
pub const TRACKER_DEFAULT_DIST: f32 = 0.12;
pub const TRACKER_DETECTION_THRESHOLD: f32 = 0.85;

// Synthetic cursor
pub const SYNTHETIC_PERIOD_SEC: [f32; 2] = [7.0, 11.0];

#[inline]
pub fn camera_rest_eye() -> Vec3 {
    Vec3::from(CAMERA_REST_EYE)
}
