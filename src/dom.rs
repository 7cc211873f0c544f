use parallax_core::{ResizeOutcome, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_error(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Attach `handler` for `event` on `target` for the lifetime of the page.
pub fn add_listener<E: JsCast>(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(E) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(web::Event)>);
    if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
        log::warn!("[dom] failed to listen for '{}': {:?}", event, e);
    }
    closure.forget();
}

/// Query string of the current page without the leading `?`.
pub fn query_string(window: &web::Window) -> String {
    window
        .location()
        .search()
        .map(|s| s.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

/// Window size in CSS pixels plus the raw device pixel ratio.
pub fn read_viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as f32;
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

/// Match the canvas backing store to the (capped) physical size.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, outcome: &ResizeOutcome) {
    let (w, h) = outcome.surface_size;
    canvas.set_width(w.max(1));
    canvas.set_height(h.max(1));
}
