use crate::{loader, overlay, render};
use parallax_core::gpu::PlaneSurface;
use parallax_core::{
    AppState, Command, CursorTracker, FrameLoop, FrameTime, Inbox, LoadOutcome, LoopControl,
    ReloadCoordinator, SceneSlot, SettingsEdit, Stopwatch, TrackerMode,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub state: AppState,
    pub frame_loop: FrameLoop,
    pub clock: Stopwatch,
    pub tracker: Box<dyn CursorTracker>,
    pub tracker_mode: TrackerMode,
    pub coordinator: ReloadCoordinator,
    pub slot: SceneSlot<PlaneSurface>,
    pub loads: Inbox<LoadOutcome>,
    pub commands: Inbox<Command>,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
}

impl FrameContext {
    /// One requestAnimationFrame callback.
    pub fn frame(&mut self) -> LoopControl {
        let mut time = None;
        let control = self.frame_loop.step(self.clock.now_sec(), |t| time = Some(t));
        if let Some(t) = time {
            self.tick(t);
        }
        control
    }

    fn tick(&mut self, t: FrameTime) {
        self.drain_commands();
        self.drain_loads();

        let signal = self.tracker.sample(t.elapsed);
        let out = self.state.tick(t, signal);
        if let Some(gpu) = &mut self.gpu {
            if let Err(e) = gpu.render(self.slot.live(), &out.uniforms) {
                log::warn!("[gpu] frame skipped: {:?}", e);
            }
        }
        if let Some(req) = out.reload {
            self.start_load(&req.key);
            overlay::update_settings(&self.document, self.state.settings(), self.tracker_mode);
        }
        self.flush_notices();
    }

    pub fn on_resize(&mut self) {
        let Some(window) = web::window() else {
            return;
        };
        let outcome = self.state.apply_resize(crate::dom::read_viewport(&window));
        crate::dom::apply_canvas_size(&self.canvas, &outcome);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(outcome.surface_size.0, outcome.surface_size.1);
        }
    }

    fn start_load(&mut self, key: &str) {
        match self.coordinator.request(key) {
            Ok(ticket) => loader::load_pair(ticket, self.loads.clone()),
            Err(e) => self.state.notice(e),
        }
    }

    fn drain_commands(&mut self) {
        for cmd in self.commands.drain() {
            let edit = match cmd {
                Command::Edit(edit) => edit,
                Command::SelectDigit(d) => match self.state.playlist().key_for_digit(d) {
                    Some(key) => SettingsEdit::ImageKey(key.to_string()),
                    None => continue,
                },
                Command::NextImage => {
                    if let Some(req) = self.state.next_image() {
                        self.start_load(&req.key);
                        overlay::update_settings(
                            &self.document,
                            self.state.settings(),
                            self.tracker_mode,
                        );
                    }
                    continue;
                }
                Command::ToggleOverlay => {
                    let visible = overlay::toggle_hints(&self.document);
                    log::debug!("[keys] hints {}", if visible { "shown" } else { "hidden" });
                    continue;
                }
            };
            // Rejections are queued as notices by commit
            if let Ok(true) = self.state.commit(edit) {
                overlay::update_settings(&self.document, self.state.settings(), self.tracker_mode);
            }
        }
    }

    fn drain_loads(&mut self) {
        for outcome in self.loads.drain() {
            let gpu = self.gpu.as_ref();
            let resized = self.state.apply_completion(
                &mut self.coordinator,
                &mut self.slot,
                outcome,
                |pair| match gpu {
                    Some(g) => Ok(g.create_plane_surface(pair)),
                    None => Err(anyhow::anyhow!("WebGPU unavailable")),
                },
            );
            if let Some(outcome) = resized {
                crate::dom::apply_canvas_size(&self.canvas, &outcome);
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(outcome.surface_size.0, outcome.surface_size.1);
                }
                overlay::show_error(&self.document, None);
            }
        }
    }

    fn flush_notices(&mut self) {
        if let Some(last) = self.state.take_notices().last() {
            overlay::show_error(&self.document, Some(&last.to_string()));
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until its loop stops.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx.borrow_mut().frame() == LoopControl::Stop {
            log::info!("[loop] stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
