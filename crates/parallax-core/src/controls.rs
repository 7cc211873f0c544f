//! Keyboard controls shared by both front-ends. Keys use DOM
//! `KeyboardEvent.key` names; the native front-end translates winit keys to
//! the same names.

use crate::constants::{STRENGTH_STEP, THRESHOLD_STEP};
use crate::settings::SettingsEdit;

/// Work queued by input callbacks, drained at the start of a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Edit(SettingsEdit),
    /// Digit shortcut; resolved against the playlist when drained.
    SelectDigit(u32),
    NextImage,
    ToggleOverlay,
}

#[inline]
pub fn command_for_key(key: &str) -> Option<Command> {
    let nudge = |dx: f32, dy: f32| Some(Command::Edit(SettingsEdit::NudgeThreshold { dx, dy }));
    match key {
        "ArrowLeft" => nudge(-THRESHOLD_STEP, 0.0),
        "ArrowRight" => nudge(THRESHOLD_STEP, 0.0),
        "ArrowUp" => nudge(0.0, THRESHOLD_STEP),
        "ArrowDown" => nudge(0.0, -THRESHOLD_STEP),
        "+" | "=" => Some(Command::Edit(SettingsEdit::NudgeStrength(STRENGTH_STEP))),
        "-" | "_" => Some(Command::Edit(SettingsEdit::NudgeStrength(-STRENGTH_STEP))),
        "n" | "N" => Some(Command::NextImage),
        "h" | "H" => Some(Command::ToggleOverlay),
        _ => {
            let mut chars = key.chars();
            match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
                (Some(d), None) if d > 0 => Some(Command::SelectDigit(d)),
                _ => None,
            }
        }
    }
}
