use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParallaxError {
    #[error("image '{key}' failed to load: {reason}")]
    ImageLoadFailed { key: String, reason: String },
    #[error("decoded image has degenerate size {width}x{height}")]
    DegenerateImage { width: u32, height: u32 },
    #[error("invalid value '{value}' for setting '{name}'")]
    InvalidSetting { name: String, value: String },
    #[error("unknown image key '{0}'")]
    UnknownImageKey(String),
}

pub type Result<T> = std::result::Result<T, ParallaxError>;
