//! CPU reference of the depth-parallax fragment shader.
//!
//! `shaders/parallax.wgsl` runs the same math on the GPU. Keeping a host
//! version lets the displacement model be exercised without a device.

use glam::{Vec2, Vec4};

/// Fold any coordinate into `[0, 1]` with mirror repeat (period 2).
#[inline]
pub fn mirrored(v: f32) -> f32 {
    let m = v.rem_euclid(2.0);
    if m >= 1.0 {
        2.0 - m
    } else {
        m
    }
}

#[inline]
pub fn mirrored_uv(uv: Vec2) -> Vec2 {
    Vec2::new(mirrored(uv.x), mirrored(uv.y))
}

/// Displaced coordinate for a given depth sample. Mid-grey (0.5) stays put,
/// nearer and farther pixels move in opposite directions.
#[inline]
pub fn parallax_uv(uv: Vec2, depth: f32, offset: Vec2, threshold: Vec2) -> Vec2 {
    uv + (depth - 0.5) * offset / threshold
}

/// Anything the shader can sample at a normalized coordinate.
pub trait TextureSampler {
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// Nearest-neighbour sampler over a tightly packed RGBA8 buffer.
#[derive(Clone, Copy, Debug)]
pub struct Rgba8Sampler<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u8],
}

impl TextureSampler for Rgba8Sampler<'_> {
    fn sample(&self, uv: Vec2) -> Vec4 {
        if self.width == 0 || self.height == 0 {
            return Vec4::ZERO;
        }
        let x = ((uv.x.clamp(0.0, 1.0) * self.width as f32) as u32).min(self.width - 1);
        let y = ((uv.y.clamp(0.0, 1.0) * self.height as f32) as u32).min(self.height - 1);
        let i = ((y * self.width + x) * 4) as usize;
        match self.pixels.get(i..i + 4) {
            Some(px) => Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0,
            None => Vec4::ZERO,
        }
    }
}

/// Evaluate the fragment shader for one output coordinate.
pub fn shade<C, D>(color: &C, depth: &D, uv: Vec2, offset: Vec2, threshold: Vec2) -> Vec4
where
    C: TextureSampler + ?Sized,
    D: TextureSampler + ?Sized,
{
    let d = depth.sample(mirrored_uv(uv)).x;
    let displaced = parallax_uv(uv, d, offset, threshold);
    color.sample(mirrored_uv(displaced))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_reference_points() {
        assert!((mirrored(0.5) - 0.5).abs() < 1e-6);
        assert!((mirrored(1.5) - 0.5).abs() < 1e-6);
        assert!((mirrored(2.3) - 0.3).abs() < 1e-5);
        assert!((mirrored(-0.2) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn mid_grey_depth_does_not_move() {
        let uv = Vec2::new(0.3, 0.7);
        let out = parallax_uv(uv, 0.5, Vec2::new(4.0, -3.0), Vec2::new(20.0, 35.0));
        assert_eq!(out, uv);
    }
}
