use glam::Vec2;

/// Exponentially smoothed cursor offset (`lerpX`, `lerpY`).
///
/// The blend factor is `rate * dt`, capped at 1 so a long frame (tab in the
/// background, debugger pause) lands on the target instead of overshooting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothedCursor {
    pub lerp: Vec2,
}

impl SmoothedCursor {
    pub fn step(&mut self, target: Vec2, rate: f32, dt_sec: f32) -> Vec2 {
        let alpha = blend_factor(rate, dt_sec);
        self.lerp += (target - self.lerp) * alpha;
        self.lerp
    }
}

#[inline]
pub fn blend_factor(rate: f32, dt_sec: f32) -> f32 {
    (rate * dt_sec.max(0.0)).min(1.0)
}
