use crate::dom;
use crate::input;
use parallax_core::{CursorSignal, LatestCursor};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn pointer_canvas_uv(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_uv(
        [ev.client_x() as f32, ev.client_y() as f32],
        [rect.left() as f32, rect.top() as f32],
        [rect.width() as f32, rect.height() as f32],
    )
}

/// Pointer position over the canvas feeds `cursor`; leaving the canvas
/// recenters the view.
pub fn wire_pointer_tracking(canvas: &web::HtmlCanvasElement, cursor: LatestCursor) {
    let target = canvas.unchecked_ref::<web::EventTarget>();

    let move_canvas = canvas.clone();
    let move_cursor = cursor.clone();
    dom::add_listener(target, "pointermove", move |ev: web::PointerEvent| {
        let uv = pointer_canvas_uv(&ev, &move_canvas);
        move_cursor.publish(input::pointer_sample(uv));
    });

    dom::add_listener(target, "pointerleave", move |_ev: web::PointerEvent| {
        cursor.publish(CursorSignal::NEUTRAL);
    });
}
