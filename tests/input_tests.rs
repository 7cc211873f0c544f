// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;
use parallax_core::{Command, CursorSignal, SettingsEdit, HEAD_SCALE};

#[test]
fn client_position_maps_to_element_uv() {
    let uv = client_to_uv([150.0, 60.0], [50.0, 10.0], [200.0, 100.0]);
    assert_eq!(uv, [0.5, 0.5]);
    let corner = client_to_uv([50.0, 110.0], [50.0, 10.0], [200.0, 100.0]);
    assert_eq!(corner, [0.0, 1.0]);
}

#[test]
fn client_position_outside_element_is_clamped() {
    let uv = client_to_uv([-20.0, 500.0], [0.0, 0.0], [100.0, 100.0]);
    assert_eq!(uv, [0.0, 1.0]);
}

#[test]
fn collapsed_element_reads_as_centered() {
    assert_eq!(client_to_uv([10.0, 10.0], [0.0, 0.0], [0.0, 50.0]), [0.5, 0.5]);
}

#[test]
fn pointer_sample_uses_head_gains() {
    assert_eq!(pointer_sample([0.5, 0.5]), CursorSignal { x: 0.0, y: 0.0, z: None });
    let s = pointer_sample([0.0, 1.0]);
    assert_eq!((s.x, s.y), (-HEAD_SCALE[0], HEAD_SCALE[1]));
}

#[test]
fn settings_query_becomes_edits_in_order() {
    let cmds = commands_from_query("strength=0.4&image=2&x_threshold=90").unwrap();
    assert_eq!(
        cmds,
        vec![
            Command::Edit(SettingsEdit::Strength(0.4)),
            Command::Edit(SettingsEdit::ImageKey("2".into())),
            Command::Edit(SettingsEdit::XThreshold(90.0)),
        ]
    );
}

#[test]
fn bad_settings_query_is_rejected_whole() {
    let err = commands_from_query("strength=0.4&y_threshold=tall&zoom=2").unwrap_err();
    assert!(err.contains("y_threshold"));
    assert!(err.contains("zoom"));
}

#[test]
fn empty_settings_query_is_a_no_op() {
    assert_eq!(commands_from_query(""), Ok(vec![]));
}

#[test]
fn settings_query_values_are_decoded() {
    let cmds = commands_from_query("image=my%20photo").unwrap();
    assert_eq!(cmds, vec![Command::Edit(SettingsEdit::ImageKey("my photo".into()))]);
}
