use crate::dom;
use parallax_core::{command_for_key, Command, Inbox};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Queue a [`Command`] for every recognized key. Keys typed into form
/// fields are left alone.
pub fn wire_global_keydown(window: &web::Window, commands: Inbox<Command>) {
    dom::add_listener(
        window.unchecked_ref::<web::EventTarget>(),
        "keydown",
        move |ev: web::KeyboardEvent| {
            if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || typing_in_field(&ev) {
                return;
            }
            if let Some(cmd) = command_for_key(&ev.key()) {
                log::debug!("[keys] {} -> {:?}", ev.key(), cmd);
                if ev.key().starts_with("Arrow") {
                    ev.prevent_default();
                }
                commands.push(cmd);
            }
        },
    );
}

fn typing_in_field(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}
