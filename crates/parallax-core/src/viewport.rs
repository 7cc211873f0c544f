//! Viewport sizing: camera aspect, plane cover-fit and drawing-buffer size.

use crate::constants::{MAX_PIXEL_RATIO, PLANE_EXTENT};
use crate::image::ImageDetails;
use glam::Vec3;

/// CSS-pixel (or logical) window size plus the device pixel density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// width / height, guarded against a collapsed window.
    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }

    pub fn pixel_ratio(&self) -> f64 {
        capped_pixel_ratio(self.device_pixel_ratio)
    }

    /// Drawing-buffer size in physical pixels.
    pub fn physical_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        let w = (self.width as f64 * r).round() as u32;
        let h = (self.height as f64 * r).round() as u32;
        (w.max(1), h.max(1))
    }
}

#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitBranch {
    /// Plane width follows the viewport width.
    WidthConstrained,
    /// Plane height is pinned to the plane extent.
    HeightConstrained,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneFit {
    pub scale: Vec3,
    pub branch: FitBranch,
}

/// Scale the unit plane so the image covers the viewport without distortion.
pub fn fit_plane(viewport: &Viewport, image: &ImageDetails) -> PlaneFit {
    let aspect = image.aspect_ratio;
    let view_ratio = viewport.height.max(1.0) / viewport.width.max(1.0);
    if view_ratio < aspect {
        let w = PLANE_EXTENT * viewport.aspect();
        PlaneFit {
            scale: Vec3::new(w, w * aspect, 1.0),
            branch: FitBranch::WidthConstrained,
        }
    } else {
        PlaneFit {
            scale: Vec3::new(PLANE_EXTENT / aspect, PLANE_EXTENT, 1.0),
            branch: FitBranch::HeightConstrained,
        }
    }
}

/// Everything a front-end has to apply after a resize notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOutcome {
    pub camera_aspect: f32,
    pub plane: Option<PlaneFit>,
    pub surface_size: (u32, u32),
    pub pixel_ratio: f64,
}

/// Full recompute for one resize notification. Without an image yet the
/// plane keeps whatever scale it had.
pub fn resize_pass(viewport: &Viewport, image: Option<&ImageDetails>) -> ResizeOutcome {
    ResizeOutcome {
        camera_aspect: viewport.aspect(),
        plane: image.map(|i| fit_plane(viewport, i)),
        surface_size: viewport.physical_size(),
        pixel_ratio: viewport.pixel_ratio(),
    }
}
