pub mod activity;
pub mod app;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controls;
pub mod cursor;
pub mod error;
pub mod frame_loop;
#[cfg(feature = "gpu")]
pub mod gpu;
pub mod image;
pub mod loader;
pub mod playlist;
pub mod scene;
pub mod settings;
pub mod shader;
pub mod smoothing;
pub mod uniforms;
pub mod viewport;

pub static PARALLAX_WGSL: &str = include_str!("../shaders/parallax.wgsl");

pub use activity::*;
pub use app::*;
pub use camera::Camera;
pub use config::AppConfig;
pub use constants::*;
pub use controls::{command_for_key, Command};
pub use cursor::*;
pub use error::ParallaxError;
pub use frame_loop::*;
pub use image::*;
pub use loader::*;
pub use playlist::*;
pub use scene::SceneSlot;
pub use settings::{Settings, SettingsEdit};
pub use smoothing::SmoothedCursor;
pub use uniforms::PlaneUniforms;
pub use viewport::*;
