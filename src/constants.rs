// Host page conventions for the web front-end

pub const CANVAS_ID: &str = "app-canvas";

// Hint overlay (toggled with 'h')
pub const HINT_OVERLAY_ID: &str = "hint-overlay";
pub const HINT_SETTINGS_ID: &str = "hint-settings";
pub const HINT_ERROR_ID: &str = "hint-error";

// Background behind the plane while nothing is loaded or at the letterbox
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Logging level used until the query string says otherwise
pub const DEFAULT_LOG_LEVEL: &str = "info";
