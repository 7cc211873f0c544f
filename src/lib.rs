#![cfg(target_arch = "wasm32")]
use parallax_core::{
    AppConfig, AppState, CursorTracker, FrameLoop, HeadOrPointer, Inbox, LatestCursor, NeutralCursor,
    ReloadCoordinator, SceneSlot, Stopwatch, SyntheticCursor, TrackerMode,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod bridge;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = web::window()
        .map(|w| dom::query_string(&w))
        .and_then(|q| {
            parallax_core::settings::query_pairs(&q)
                .find(|(k, _)| *k == "log")
                .map(|(_, v)| v.to_string())
        })
        .unwrap_or_else(|| constants::DEFAULT_LOG_LEVEL.to_string());
    console_log::init_with_level(level.parse().unwrap_or(log::Level::Info)).ok();
    log::info!("parallax-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Startup config from the page query. A bad value is reported and the
/// defaults are used instead.
fn read_config(window: &web::Window) -> (AppConfig, Option<String>) {
    let mut config = AppConfig::default();
    let query = dom::query_string(window);
    match config.apply_query(&query) {
        Ok(()) => (config, None),
        Err(e) => {
            log::warn!("[config] {}; using defaults", e);
            (AppConfig::default(), Some(e.to_string()))
        }
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let (config, config_error) = read_config(&window);
    let mut state = AppState::new(&config, dom::read_viewport(&window));
    let sizing = state.apply_resize(*state.viewport());
    dom::apply_canvas_size(&canvas, &sizing);

    // WebGPU is optional: without it the loop still runs and reports why
    // nothing is drawn.
    let gpu = match render::GpuState::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] {:#}", e);
            None
        }
    };

    let commands = Inbox::new();
    let (tracker, head): (Box<dyn CursorTracker>, Option<LatestCursor>) = match config.tracker {
        TrackerMode::Auto => {
            let source = HeadOrPointer::default();
            events::wire_pointer_tracking(&canvas, source.pointer.clone());
            let head = source.head.clone();
            (Box::new(source), Some(head))
        }
        TrackerMode::Head => {
            let cell = LatestCursor::new();
            (Box::new(cell.clone()), Some(cell))
        }
        TrackerMode::Pointer => {
            let cell = LatestCursor::new();
            events::wire_pointer_tracking(&canvas, cell.clone());
            (Box::new(cell), None)
        }
        TrackerMode::Synthetic => (Box::new(SyntheticCursor::default()), None),
        TrackerMode::None => (Box::new(NeutralCursor), None),
    };
    bridge::install(head, commands.clone(), config.tracker_config);
    events::wire_global_keydown(&window, commands.clone());

    overlay::update_settings(&document, state.settings(), config.tracker);
    overlay::show_error(&document, config_error.as_deref());

    let frame_loop = FrameLoop::default();
    let stop = frame_loop.stop_token();
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        frame_loop,
        clock: Stopwatch::start(),
        tracker,
        tracker_mode: config.tracker,
        coordinator: ReloadCoordinator::new(config.convention.clone()),
        slot: SceneSlot::new(),
        loads: Inbox::new(),
        commands,
        gpu,
        canvas,
        document,
    }));

    let resize_ctx = frame_ctx.clone();
    dom::add_listener(&window, "resize", move |_ev: web::Event| {
        resize_ctx.borrow_mut().on_resize();
    });
    dom::add_listener(&window, "pagehide", move |_ev: web::Event| {
        stop.cancel();
    });

    frame::start_loop(frame_ctx);
    Ok(())
}
