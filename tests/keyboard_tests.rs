// Keyboard shortcuts as seen by the web front-end.

use parallax_core::{
    command_for_key, AppConfig, AppState, Command, SettingsEdit, Viewport, DEFAULT_STRENGTH,
    DEFAULT_THRESHOLD, STRENGTH_STEP, THRESHOLD_STEP,
};

#[test]
fn arrows_nudge_thresholds() {
    assert_eq!(
        command_for_key("ArrowLeft"),
        Some(Command::Edit(SettingsEdit::NudgeThreshold {
            dx: -THRESHOLD_STEP,
            dy: 0.0
        }))
    );
    assert_eq!(
        command_for_key("ArrowUp"),
        Some(Command::Edit(SettingsEdit::NudgeThreshold {
            dx: 0.0,
            dy: THRESHOLD_STEP
        }))
    );
}

#[test]
fn plus_and_minus_nudge_strength() {
    for key in ["+", "="] {
        assert_eq!(
            command_for_key(key),
            Some(Command::Edit(SettingsEdit::NudgeStrength(STRENGTH_STEP)))
        );
    }
    assert_eq!(
        command_for_key("-"),
        Some(Command::Edit(SettingsEdit::NudgeStrength(-STRENGTH_STEP)))
    );
}

#[test]
fn letters_and_digits() {
    assert_eq!(command_for_key("n"), Some(Command::NextImage));
    assert_eq!(command_for_key("H"), Some(Command::ToggleOverlay));
    assert_eq!(command_for_key("3"), Some(Command::SelectDigit(3)));
    assert_eq!(command_for_key("0"), None);
    assert_eq!(command_for_key("12"), None);
    assert_eq!(command_for_key("Shift"), None);
    assert_eq!(command_for_key("q"), None);
}

#[test]
fn shortcut_edits_commit_through_app_state() {
    let mut s = AppState::new(&AppConfig::default(), Viewport::new(800.0, 600.0, 1.0));
    for key in ["ArrowRight", "ArrowRight", "ArrowDown", "+"] {
        if let Some(Command::Edit(edit)) = command_for_key(key) {
            assert!(s.commit(edit).unwrap());
        }
    }
    let t = s.settings().threshold();
    assert_eq!(t.x, DEFAULT_THRESHOLD[0] + 2.0 * THRESHOLD_STEP);
    assert_eq!(t.y, DEFAULT_THRESHOLD[1] - THRESHOLD_STEP);
    assert!((s.settings().strength() - (DEFAULT_STRENGTH + STRENGTH_STEP)).abs() < 1e-6);
    assert!(s.reload_pending());
}
