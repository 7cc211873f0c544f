use parallax_core::{
    capped_pixel_ratio, fit_plane, resize_pass, FitBranch, ImageDetails, Viewport, PLANE_EXTENT,
};

fn portrait_image() -> ImageDetails {
    // height / width = 1.5
    ImageDetails::from_dimensions(1000, 1500).unwrap()
}

#[test]
fn tall_viewport_is_height_constrained() {
    let fit = fit_plane(&Viewport::new(900.0, 1600.0, 1.0), &portrait_image());
    assert_eq!(fit.branch, FitBranch::HeightConstrained);
    assert!((fit.scale.y - PLANE_EXTENT).abs() < 1e-6);
    assert!((fit.scale.x - PLANE_EXTENT / 1.5).abs() < 1e-6);
}

#[test]
fn wide_viewport_is_width_constrained() {
    let fit = fit_plane(&Viewport::new(1600.0, 900.0, 1.0), &portrait_image());
    assert_eq!(fit.branch, FitBranch::WidthConstrained);
    let view_aspect = 1600.0 / 900.0;
    assert!((fit.scale.x - PLANE_EXTENT * view_aspect).abs() < 1e-5);
}

#[test]
fn fit_preserves_image_aspect_ratio() {
    let image = portrait_image();
    for (w, h) in [(900.0, 1600.0), (1600.0, 900.0), (1000.0, 1000.0), (320.0, 2000.0)] {
        let fit = fit_plane(&Viewport::new(w, h, 1.0), &image);
        let ratio = fit.scale.y / fit.scale.x;
        assert!((ratio - image.aspect_ratio).abs() < 1e-5, "{w}x{h}");
    }
}

#[test]
fn fit_covers_the_visible_area() {
    let image = ImageDetails::from_dimensions(1920, 1080).unwrap();
    for (w, h) in [(900.0, 1600.0), (1600.0, 900.0), (3000.0, 800.0)] {
        let vp = Viewport::new(w, h, 1.0);
        let fit = fit_plane(&vp, &image);
        assert!(fit.scale.y >= PLANE_EXTENT - 1e-5);
        assert!(fit.scale.x >= PLANE_EXTENT * vp.aspect() - 1e-4);
    }
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(capped_pixel_ratio(3.0), 2.0);
    assert_eq!(capped_pixel_ratio(1.25), 1.25);
    assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);
    let vp = Viewport::new(800.0, 600.0, 3.0);
    assert_eq!(vp.physical_size(), (1600, 1200));
}

#[test]
fn resize_without_image_only_updates_camera_and_buffer() {
    let out = resize_pass(&Viewport::new(1280.0, 720.0, 1.0), None);
    assert!(out.plane.is_none());
    assert!((out.camera_aspect - 1280.0 / 720.0).abs() < 1e-6);
    assert_eq!(out.surface_size, (1280, 720));
}

#[test]
fn degenerate_images_are_rejected() {
    assert!(ImageDetails::from_dimensions(0, 10).is_err());
    assert!(ImageDetails::from_dimensions(10, 0).is_err());
}
