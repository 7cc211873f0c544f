// Host-side checks for the CPU reference of the parallax shader.

use glam::{Vec2, Vec4};
use parallax_core::shader::*;

/// Color keyed by coordinate so any displacement shows up in the output.
struct UvColor;

impl TextureSampler for UvColor {
    fn sample(&self, uv: Vec2) -> Vec4 {
        Vec4::new(uv.x, uv.y, 0.0, 1.0)
    }
}

struct ConstDepth(f32);

impl TextureSampler for ConstDepth {
    fn sample(&self, _uv: Vec2) -> Vec4 {
        Vec4::new(self.0, self.0, self.0, 1.0)
    }
}

/// Depth ramps left (far) to right (near).
struct RampDepth;

impl TextureSampler for RampDepth {
    fn sample(&self, uv: Vec2) -> Vec4 {
        Vec4::splat(uv.x)
    }
}

#[test]
fn mirrored_is_periodic_and_bounded() {
    let mut v = -7.0_f32;
    while v < 7.0 {
        let m = mirrored(v);
        assert!((0.0..=1.0).contains(&m), "mirrored({v}) = {m}");
        assert!((mirrored(v + 2.0) - m).abs() < 1e-4, "period broken at {v}");
        v += 0.037;
    }
}

#[test]
fn mirrored_reflects_the_upper_half() {
    assert!((mirrored(1.25) - 0.75).abs() < 1e-6);
    assert!((mirrored(-0.75) - 0.75).abs() < 1e-6);
    assert!((mirrored(3.9) - 0.1).abs() < 1e-5);
}

#[test]
fn zero_offset_samples_color_directly() {
    let threshold = Vec2::new(20.0, 35.0);
    let strength = 0.17_f32;
    let offset = Vec2::ZERO * strength;
    for i in 0..=10 {
        for j in 0..=10 {
            let uv = Vec2::new(i as f32 / 10.0, j as f32 / 10.0);
            let out = shade(&UvColor, &RampDepth, uv, offset, threshold);
            let direct = UvColor.sample(mirrored_uv(uv));
            assert!((out - direct).abs().max_element() < 1e-6, "uv {uv:?}");
        }
    }
}

#[test]
fn near_and_far_pixels_move_in_opposite_directions() {
    let threshold = Vec2::new(20.0, 20.0);
    let offset = Vec2::new(2.0, 0.0);
    let uv = Vec2::new(0.5, 0.5);
    let near = shade(&UvColor, &ConstDepth(1.0), uv, offset, threshold);
    let far = shade(&UvColor, &ConstDepth(0.0), uv, offset, threshold);
    assert!((near.x - 0.55).abs() < 1e-5);
    assert!((far.x - 0.45).abs() < 1e-5);
    assert_eq!(near.y, 0.5);
}

#[test]
fn larger_threshold_gives_subtler_parallax() {
    let uv = Vec2::new(0.4, 0.4);
    let offset = Vec2::new(3.0, 3.0);
    let subtle = parallax_uv(uv, 1.0, offset, Vec2::splat(160.0)) - uv;
    let strong = parallax_uv(uv, 1.0, offset, Vec2::splat(20.0)) - uv;
    assert!(subtle.length() < strong.length());
}

#[test]
fn huge_offsets_still_sample_inside_the_texture() {
    let threshold = Vec2::new(1.0, 1.0);
    let offset = Vec2::new(1234.5, -987.0);
    let out = shade(&UvColor, &ConstDepth(0.9), Vec2::new(0.2, 0.8), offset, threshold);
    assert!((0.0..=1.0).contains(&out.x));
    assert!((0.0..=1.0).contains(&out.y));
}

#[test]
fn rgba8_sampler_reads_red_channel_for_depth() {
    // 2x1 image: left black, right white.
    let img = parallax_core::DecodedImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
    let s = img.sampler();
    assert_eq!(s.sample(Vec2::new(0.1, 0.5)).x, 0.0);
    assert_eq!(s.sample(Vec2::new(0.9, 0.5)).x, 1.0);
    assert_eq!(s.sample(Vec2::new(1.0, 1.0)).x, 1.0);
}
