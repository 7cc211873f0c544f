//! Cursor signal sources.
//!
//! The animator polls one [`CursorTracker`] per frame and treats the
//! returned sample as current truth. Event-driven sources (pointer, the
//! head-tracker bridge) write into a [`LatestCursor`] cell from their own
//! callbacks; nothing else mutates animation state from a callback.

use crate::constants::*;
use crate::error::{ParallaxError, Result};
use glam::{Vec2, Vec3};
use std::cell::Cell;
use std::rc::Rc;

/// Raw tracker output; `z` is only present for head tracking.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorSignal {
    pub x: f32,
    pub y: f32,
    pub z: Option<f32>,
}

impl CursorSignal {
    pub const NEUTRAL: Self = Self {
        x: 0.0,
        y: 0.0,
        z: None,
    };

    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

pub trait CursorTracker {
    fn sample(&mut self, now_sec: f64) -> CursorSignal;
}

/// Single-threaded latest-value cell shared between a writer callback and
/// the frame loop. Reads as neutral until the first publish.
#[derive(Clone, Debug, Default)]
pub struct LatestCursor(Rc<Cell<Option<CursorSignal>>>);

impl LatestCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, signal: CursorSignal) {
        self.0.set(Some(signal));
    }

    pub fn latest(&self) -> CursorSignal {
        self.0.get().unwrap_or(CursorSignal::NEUTRAL)
    }

    pub fn has_signal(&self) -> bool {
        self.0.get().is_some()
    }
}

impl CursorTracker for LatestCursor {
    fn sample(&mut self, _now_sec: f64) -> CursorSignal {
        self.latest()
    }
}

/// Follows the pointer until a head tracker starts publishing, then the
/// head for the rest of the session.
#[derive(Clone, Debug, Default)]
pub struct HeadOrPointer {
    pub head: LatestCursor,
    pub pointer: LatestCursor,
}

impl CursorTracker for HeadOrPointer {
    fn sample(&mut self, _now_sec: f64) -> CursorSignal {
        if self.head.has_signal() {
            self.head.latest()
        } else {
            self.pointer.latest()
        }
    }
}

/// Stands in when no tracker is available; the view stays centered.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralCursor;

impl CursorTracker for NeutralCursor {
    fn sample(&mut self, _now_sec: f64) -> CursorSignal {
        CursorSignal::NEUTRAL
    }
}

/// Slow Lissajous sweep for kiosk/demo use without any input device.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticCursor {
    pub amplitude: Vec2,
    pub period_sec: Vec2,
}

impl Default for SyntheticCursor {
    fn default() -> Self {
        Self {
            amplitude: Vec2::new(HEAD_SCALE[0], HEAD_SCALE[1]),
            period_sec: Vec2::from(SYNTHETIC_PERIOD_SEC),
        }
    }
}

impl CursorTracker for SyntheticCursor {
    fn sample(&mut self, now_sec: f64) -> CursorSignal {
        let tau = std::f64::consts::TAU;
        let px = (tau * now_sec / self.period_sec.x.max(0.001) as f64).sin() as f32;
        let py = (tau * now_sec / self.period_sec.y.max(0.001) as f64).sin() as f32;
        CursorSignal {
            x: px * self.amplitude.x,
            y: py * self.amplitude.y,
            z: None,
        }
    }
}

/// Which source feeds the animator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerMode {
    /// Pointer until head poses arrive.
    Auto,
    Head,
    Pointer,
    Synthetic,
    None,
}

impl std::str::FromStr for TrackerMode {
    type Err = ParallaxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "head" | "face" => Ok(Self::Head),
            "pointer" | "mouse" => Ok(Self::Pointer),
            "synthetic" | "demo" => Ok(Self::Synthetic),
            "none" | "off" => Ok(Self::None),
            _ => Err(ParallaxError::InvalidSetting {
                name: "tracker".into(),
                value: s.into(),
            }),
        }
    }
}

/// Options handed to the face-tracking library. These tune the tracker's own
/// smoothing and detection, separate from the animator's low-pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackerConfig {
    pub smooth_dist: f32,
    pub default_dist: f32,
    pub threshold: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            smooth_dist: TRACKER_SMOOTH_DIST,
            default_dist: TRACKER_DEFAULT_DIST,
            threshold: TRACKER_DETECTION_THRESHOLD,
        }
    }
}

/// Per-axis gain from a raw head pose to a cursor signal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeadPoseScale(pub Vec3);

impl Default for HeadPoseScale {
    fn default() -> Self {
        Self(Vec3::from(HEAD_SCALE))
    }
}

impl HeadPoseScale {
    pub fn apply(&self, x: f32, y: f32, z: f32) -> CursorSignal {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        CursorSignal {
            x: finite(x) * self.0.x,
            y: finite(y) * self.0.y,
            z: Some(finite(z) * self.0.z),
        }
    }
}

/// Map a pointer position in normalized window coordinates (`[0,1]`, y
/// down) to a cursor signal centered on the window, using the same gains as
/// head tracking so both feel alike.
#[inline]
pub fn pointer_signal(uv: [f32; 2], scale: &HeadPoseScale) -> CursorSignal {
    let u = uv[0].clamp(0.0, 1.0) * 2.0 - 1.0;
    let v = uv[1].clamp(0.0, 1.0) * 2.0 - 1.0;
    CursorSignal {
        x: u * scale.0.x,
        y: v * scale.0.y,
        z: None,
    }
}
