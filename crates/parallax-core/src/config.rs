use crate::constants::ROTATION_INTERVAL_SEC;
use crate::cursor::{TrackerConfig, TrackerMode};
use crate::error::Result;
use crate::loader::PathConvention;
use crate::playlist::Playlist;
use crate::settings::{parse_f32, Settings};

/// Startup configuration shared by both front-ends.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub settings: Settings,
    pub playlist: Playlist,
    pub convention: PathConvention,
    pub tracker: TrackerMode,
    pub tracker_config: TrackerConfig,
    pub rotation_interval_sec: f64,
    pub shuffle_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            playlist: Playlist::default(),
            convention: PathConvention::default(),
            tracker: TrackerMode::Auto,
            tracker_config: TrackerConfig::default(),
            rotation_interval_sec: ROTATION_INTERVAL_SEC,
            shuffle_seed: None,
        }
    }
}

impl AppConfig {
    /// Layer a URL query string over the current values.
    ///
    /// Besides the [`Settings`] keys this understands `tracker`, `keys`
    /// (comma separated), `dir`, `ext`, `depth` (`suffix` or a shared depth
    /// path), `rotate` (seconds) and `shuffle` (seed). Unknown keys are
    /// logged and ignored.
    pub fn apply_query(&mut self, query: &str) -> Result<()> {
        let rest = self.settings.apply_query(query)?;
        let (mut dir, mut ext, mut depth) = match &self.convention {
            PathConvention::Suffixed { dir, extension } => (dir.clone(), extension.clone(), None),
            PathConvention::SharedDepth {
                dir,
                extension,
                depth_path,
            } => (dir.clone(), extension.clone(), Some(depth_path.clone())),
        };
        for (k, v) in &rest {
            let (k, v) = (*k, v.as_ref());
            match k {
                "tracker" => self.tracker = v.parse()?,
                "keys" => self.playlist = Playlist::parse(v)?,
                "dir" => dir = v.to_string(),
                "ext" => ext = v.trim_start_matches('.').to_string(),
                "depth" if v == "suffix" => depth = None,
                "depth" => depth = Some(v.to_string()),
                "rotate" => self.rotation_interval_sec = parse_f32(k, v)?.max(0.1) as f64,
                "shuffle" => {
                    self.shuffle_seed = Some(v.parse().map_err(|_| {
                        crate::error::ParallaxError::InvalidSetting {
                            name: k.to_string(),
                            value: v.to_string(),
                        }
                    })?)
                }
                _ => log::debug!("[config] ignoring query key '{}'", k),
            }
        }
        self.convention = match depth {
            Some(depth_path) => PathConvention::SharedDepth {
                dir,
                extension: ext,
                depth_path,
            },
            None => PathConvention::Suffixed {
                dir,
                extension: ext,
            },
        };
        Ok(())
    }
}
