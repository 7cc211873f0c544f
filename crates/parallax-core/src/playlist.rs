//! Image keys the showcase cycles through while the viewer is idle.

use crate::error::{ParallaxError, Result};
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct Playlist {
    keys: Vec<String>,
    index: usize,
}

impl Default for Playlist {
    fn default() -> Self {
        Self {
            keys: vec!["1".into(), "2".into()],
            index: 0,
        }
    }
}

impl Playlist {
    pub fn new(keys: Vec<String>) -> Result<Self> {
        let keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
        if keys.is_empty() {
            return Err(ParallaxError::InvalidSetting {
                name: "keys".into(),
                value: String::new(),
            });
        }
        Ok(Self { keys, index: 0 })
    }

    /// Comma separated list, e.g. `"1,2,beach"`.
    pub fn parse(list: &str) -> Result<Self> {
        Self::new(list.split(',').map(str::to_string).collect())
    }

    /// Reorder with a seeded RNG so a run is reproducible.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.keys.shuffle(&mut rng);
        self.index = 0;
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn current(&self) -> &str {
        &self.keys[self.index]
    }

    /// Point at `key` if it is in the list; unknown keys leave the cursor.
    pub fn select(&mut self, key: &str) -> bool {
        match self.keys.iter().position(|k| k == key) {
            Some(i) => {
                self.index = i;
                true
            }
            None => false,
        }
    }

    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.keys.len();
        self.current()
    }

    /// Key for a digit shortcut (`"1"` is the first entry).
    pub fn key_for_digit(&self, digit: u32) -> Option<&str> {
        let i = (digit as usize).checked_sub(1)?;
        self.keys.get(i).map(String::as_str)
    }
}

/// Accumulates continuous idle time and fires every `interval_sec`.
#[derive(Clone, Debug)]
pub struct RotationTimer {
    interval_sec: f64,
    idle_accum: f64,
}

impl RotationTimer {
    pub fn new(interval_sec: f64) -> Self {
        Self {
            interval_sec: interval_sec.max(0.1),
            idle_accum: 0.0,
        }
    }

    pub fn interval_sec(&self) -> f64 {
        self.interval_sec
    }

    /// Add idle time; true when a rotation is due.
    pub fn advance(&mut self, dt_sec: f64) -> bool {
        self.idle_accum += dt_sec.max(0.0);
        if self.idle_accum >= self.interval_sec {
            self.idle_accum = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.idle_accum = 0.0;
    }
}
