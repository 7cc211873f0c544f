use parallax_core::*;

#[test]
fn defaults_follow_reference_page() {
    let s = Settings::default();
    assert_eq!(s.threshold().to_array(), DEFAULT_THRESHOLD);
    assert_eq!(s.strength(), DEFAULT_STRENGTH);
    assert_eq!(s.image_key(), "1");
}

#[test]
fn new_clamps_every_field() {
    let s = Settings::new(0.0, -5.0, 9.0, " 2 ").unwrap();
    assert_eq!(s.threshold().x, MIN_THRESHOLD);
    assert_eq!(s.threshold().y, MIN_THRESHOLD);
    assert_eq!(s.strength(), MAX_STRENGTH);
    assert_eq!(s.image_key(), "2");
}

#[test]
fn apply_reports_whether_anything_changed() {
    let mut s = Settings::default();
    assert!(!s.apply(SettingsEdit::Strength(DEFAULT_STRENGTH)).unwrap());
    assert!(s.apply(SettingsEdit::Strength(0.5)).unwrap());
    assert!(s.apply(SettingsEdit::NudgeThreshold { dx: 1.0, dy: -1.0 }).unwrap());
    assert_eq!(s.threshold().to_array(), [161.0, 159.0]);
}

#[test]
fn nudges_stop_at_the_bounds() {
    let mut s = Settings::new(1.0, 1.0, 0.05, "1").unwrap();
    s.apply(SettingsEdit::NudgeThreshold { dx: -5.0, dy: -5.0 })
        .unwrap();
    s.apply(SettingsEdit::NudgeStrength(-1.0)).unwrap();
    assert_eq!(s.threshold().x, MIN_THRESHOLD);
    assert_eq!(s.strength(), 0.0);
}

#[test]
fn empty_image_key_is_rejected() {
    let mut s = Settings::default();
    let err = s.apply(SettingsEdit::ImageKey("   ".into())).unwrap_err();
    assert!(matches!(err, ParallaxError::InvalidSetting { .. }));
    assert_eq!(s.image_key(), "1");
}

#[test]
fn query_sets_known_keys_and_returns_the_rest() {
    let mut s = Settings::default();
    let rest = s
        .apply_query("?x_threshold=20&y_threshold=35&strength=0.17&image=2&tracker=pointer")
        .unwrap();
    assert_eq!(s.threshold().to_array(), [20.0, 35.0]);
    assert!((s.strength() - 0.17).abs() < 1e-6);
    assert_eq!(s.image_key(), "2");
    assert_eq!(rest, vec![("tracker", std::borrow::Cow::from("pointer"))]);
}

#[test]
fn query_with_garbage_number_is_an_error() {
    let mut s = Settings::default();
    assert!(s.apply_query("strength=lots").is_err());
}

#[test]
fn app_config_query_switches_layout_and_tracker() {
    let mut c = AppConfig::default();
    c.apply_query("tracker=synthetic&keys=a,b,c&dir=photos&ext=.jpg&depth=suffix&rotate=8&shuffle=7")
        .unwrap();
    assert_eq!(c.tracker, TrackerMode::Synthetic);
    assert_eq!(c.playlist.keys(), ["a", "b", "c"]);
    assert_eq!(
        c.convention,
        PathConvention::Suffixed {
            dir: "photos".into(),
            extension: "jpg".into()
        }
    );
    assert_eq!(c.rotation_interval_sec, 8.0);
    assert_eq!(c.shuffle_seed, Some(7));
}

#[test]
fn app_config_keeps_shared_depth_by_default() {
    let mut c = AppConfig::default();
    c.apply_query("dir=img/v").unwrap();
    assert_eq!(
        c.convention.resolve("3").unwrap(),
        ImagePaths {
            color: "img/v/3.png".into(),
            depth: "img/1.jpg".into()
        }
    );
}

#[test]
fn query_values_are_percent_decoded() {
    let mut c = AppConfig::default();
    c.apply_query("dir=img%2Fv&image=my+photo&keys=my%20photo,b").unwrap();
    assert_eq!(c.settings.image_key(), "my photo");
    assert_eq!(c.playlist.keys()[0], "my photo");
    assert_eq!(c.convention.resolve("3").unwrap().color, "img/v/3.png");

    assert_eq!(settings::percent_decode("100%"), "100%");
    assert_eq!(settings::percent_decode("%zz%41"), "%zzA");
}

#[test]
fn encoded_separators_cannot_escape_the_image_directory() {
    let mut s = Settings::default();
    s.apply_query("image=..%2Fsecret").unwrap();
    assert_eq!(s.image_key(), "../secret");
    assert!(PathConvention::default().resolve(s.image_key()).is_err());
}

#[test]
fn unknown_tracker_is_rejected() {
    let mut c = AppConfig::default();
    assert!(c.apply_query("tracker=telepathy").is_err());
}

#[test]
fn playlist_rotates_and_maps_digits() {
    let mut p = Playlist::parse("1, 2 ,3").unwrap();
    assert_eq!(p.current(), "1");
    assert_eq!(p.advance(), "2");
    assert_eq!(p.advance(), "3");
    assert_eq!(p.advance(), "1");
    assert_eq!(p.key_for_digit(2), Some("2"));
    assert_eq!(p.key_for_digit(0), None);
    assert_eq!(p.key_for_digit(9), None);
    assert!(Playlist::parse(" , ").is_err());
}

#[test]
fn seeded_shuffle_is_reproducible() {
    let keys: Vec<String> = (0..20).map(|i| i.to_string()).collect();
    let mut a = Playlist::new(keys.clone()).unwrap();
    let mut b = Playlist::new(keys).unwrap();
    a.shuffle(42);
    b.shuffle(42);
    assert_eq!(a.keys(), b.keys());
}
