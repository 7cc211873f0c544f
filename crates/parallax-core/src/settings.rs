//! User-tunable parallax settings and the single place they are validated.
//!
//! Every writer (keyboard shortcuts, URL query, CLI flags, the JS bridge)
//! goes through [`Settings::apply`], so the threshold floor and strength
//! clamp hold no matter where an edit came from.

use crate::constants::{
    DEFAULT_IMAGE_KEY, DEFAULT_STRENGTH, DEFAULT_THRESHOLD, MAX_STRENGTH, MAX_THRESHOLD,
    MIN_THRESHOLD,
};
use crate::error::{ParallaxError, Result};
use glam::Vec2;
use std::borrow::Cow;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    threshold: Vec2,
    strength: f32,
    image_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: Vec2::from(DEFAULT_THRESHOLD),
            strength: DEFAULT_STRENGTH,
            image_key: DEFAULT_IMAGE_KEY.to_string(),
        }
    }
}

/// One committed edit from the configuration surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingsEdit {
    XThreshold(f32),
    YThreshold(f32),
    Strength(f32),
    ImageKey(String),
    NudgeThreshold { dx: f32, dy: f32 },
    NudgeStrength(f32),
}

/// Floors a threshold at [`MIN_THRESHOLD`]; `None` for NaN or infinity.
#[inline]
pub fn sanitize_threshold(v: f32) -> Option<f32> {
    v.is_finite().then(|| v.clamp(MIN_THRESHOLD, MAX_THRESHOLD))
}

#[inline]
pub fn sanitize_strength(v: f32) -> Option<f32> {
    v.is_finite().then(|| v.clamp(0.0, MAX_STRENGTH))
}

impl Settings {
    pub fn new(x_threshold: f32, y_threshold: f32, strength: f32, image_key: &str) -> Result<Self> {
        let mut s = Self::default();
        s.apply(SettingsEdit::XThreshold(x_threshold))?;
        s.apply(SettingsEdit::YThreshold(y_threshold))?;
        s.apply(SettingsEdit::Strength(strength))?;
        s.apply(SettingsEdit::ImageKey(image_key.to_string()))?;
        Ok(s)
    }

    pub fn threshold(&self) -> Vec2 {
        self.threshold
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn image_key(&self) -> &str {
        &self.image_key
    }

    /// Point at a key already known to be valid, e.g. a playlist entry.
    pub(crate) fn set_image_key(&mut self, key: &str) {
        self.image_key = key.to_string();
    }

    /// Apply an edit. Returns whether any value actually changed.
    pub fn apply(&mut self, edit: SettingsEdit) -> Result<bool> {
        let before = self.clone();
        match edit {
            SettingsEdit::XThreshold(v) => {
                self.threshold.x = sanitize_threshold(v).ok_or_else(|| invalid("x_threshold", v))?;
            }
            SettingsEdit::YThreshold(v) => {
                self.threshold.y = sanitize_threshold(v).ok_or_else(|| invalid("y_threshold", v))?;
            }
            SettingsEdit::Strength(v) => {
                self.strength = sanitize_strength(v).ok_or_else(|| invalid("strength", v))?;
            }
            SettingsEdit::ImageKey(key) => {
                let key = key.trim();
                if key.is_empty() {
                    return Err(ParallaxError::InvalidSetting {
                        name: "image".into(),
                        value: key.into(),
                    });
                }
                self.image_key = key.to_string();
            }
            SettingsEdit::NudgeThreshold { dx, dy } => {
                let next = self.threshold + Vec2::new(dx, dy);
                self.threshold.x =
                    sanitize_threshold(next.x).ok_or_else(|| invalid("x_threshold", next.x))?;
                self.threshold.y =
                    sanitize_threshold(next.y).ok_or_else(|| invalid("y_threshold", next.y))?;
            }
            SettingsEdit::NudgeStrength(d) => {
                let next = self.strength + d;
                self.strength = sanitize_strength(next).ok_or_else(|| invalid("strength", next))?;
            }
        }
        Ok(*self != before)
    }

    /// Apply `key=value` pairs from a URL query string (leading `?` optional).
    ///
    /// Recognized keys are `x_threshold`, `y_threshold`, `strength` and
    /// `image`; anything else is returned untouched so callers can layer
    /// their own options on top.
    pub fn apply_query<'q>(&mut self, query: &'q str) -> Result<Vec<(&'q str, Cow<'q, str>)>> {
        let mut rest = Vec::new();
        for (k, v) in query_pairs(query) {
            match SettingsEdit::from_pair(k, &v) {
                Some(edit) => {
                    self.apply(edit?)?;
                }
                None => rest.push((k, v)),
            }
        }
        Ok(rest)
    }
}

impl SettingsEdit {
    /// Edit for one `name=value` setting pair, `None` if the name is not a
    /// setting.
    pub fn from_pair(name: &str, value: &str) -> Option<Result<Self>> {
        let edit = match name {
            "x_threshold" => parse_f32(name, value).map(Self::XThreshold),
            "y_threshold" => parse_f32(name, value).map(Self::YThreshold),
            "strength" => parse_f32(name, value).map(Self::Strength),
            "image" => Ok(Self::ImageKey(value.to_string())),
            _ => return None,
        };
        Some(edit)
    }
}

/// Split a query string into `(key, value)` pairs. Pairs without `=` get an
/// empty value. Values are percent-decoded; keys are matched as written.
pub fn query_pairs(query: &str) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|p| !p.is_empty())
        .map(|p| {
            let (k, v) = p.split_once('=').unwrap_or((p, ""));
            (k, percent_decode(v))
        })
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes are kept
/// literally and invalid UTF-8 is replaced.
pub fn percent_decode(s: &str) -> Cow<'_, str> {
    if !s.contains(['%', '+']) {
        return Cow::Borrowed(s);
    }
    let hex = |b: u8| -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    };
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len() => match (hex(bytes[i + 1]), hex(bytes[i + 2])) {
                (Some(hi), Some(lo)) => {
                    out.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

pub(crate) fn parse_f32(name: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|_| ParallaxError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
}

fn invalid(name: &str, value: f32) -> ParallaxError {
    ParallaxError::InvalidSetting {
        name: name.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_threshold_is_floored() {
        let mut s = Settings::default();
        s.apply(SettingsEdit::XThreshold(0.0)).unwrap();
        assert_eq!(s.threshold().x, MIN_THRESHOLD);
        assert!(s.threshold().x > 0.0);
    }

    #[test]
    fn nan_strength_is_rejected_and_keeps_previous() {
        let mut s = Settings::default();
        assert!(s.apply(SettingsEdit::Strength(f32::NAN)).is_err());
        assert_eq!(s.strength(), DEFAULT_STRENGTH);
    }

    #[test]
    fn setting_pairs_map_to_edits() {
        assert_eq!(
            SettingsEdit::from_pair("strength", "0.5"),
            Some(Ok(SettingsEdit::Strength(0.5)))
        );
        assert!(matches!(
            SettingsEdit::from_pair("x_threshold", "wide"),
            Some(Err(ParallaxError::InvalidSetting { .. }))
        ));
        assert_eq!(SettingsEdit::from_pair("tracker", "head"), None);
    }
}
