// Host-side tests for the web front-end's constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct_and_non_empty() {
    let ids = [CANVAS_ID, HINT_OVERLAY_ID, HINT_SETTINGS_ID, HINT_ERROR_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "'{}' is not a valid element id", a);
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn clear_color_is_opaque_and_normalized() {
    assert!(CLEAR_RGBA.iter().all(|c| (0.0..=1.0).contains(c)));
    assert_eq!(CLEAR_RGBA[3], 1.0);
}

#[test]
fn default_log_level_parses() {
    assert!(DEFAULT_LOG_LEVEL.parse::<log::Level>().is_ok());
}
