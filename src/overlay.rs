use crate::constants::{HINT_ERROR_ID, HINT_OVERLAY_ID, HINT_SETTINGS_ID};
use parallax_core::{Settings, TrackerMode};
use web_sys as web;

/// Flip the hint overlay's `hidden` attribute. Returns whether the hints
/// are visible afterwards.
pub fn toggle_hints(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(HINT_OVERLAY_ID) else {
        return false;
    };
    match el.toggle_attribute("hidden") {
        Ok(hidden) => !hidden,
        Err(e) => {
            log::warn!("[overlay] toggle failed: {:?}", e);
            true
        }
    }
}

pub fn update_settings(document: &web::Document, settings: &Settings, tracker: TrackerMode) {
    if let Some(el) = document.get_element_by_id(HINT_SETTINGS_ID) {
        let t = settings.threshold();
        el.set_text_content(Some(&format!(
            "image {} | threshold {:.0} x {:.0} | strength {:.1} | tracker {:?}",
            settings.image_key(),
            t.x,
            t.y,
            settings.strength(),
            tracker
        )));
    }
}

/// Show the latest recoverable error; `None` clears it.
pub fn show_error(document: &web::Document, message: Option<&str>) {
    if let Some(el) = document.get_element_by_id(HINT_ERROR_ID) {
        el.set_text_content(message);
    }
}
