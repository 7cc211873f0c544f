use anyhow::Context;
use clap::{ArgAction, Parser};
use crossbeam_channel::{Receiver, Sender};
use parallax_core::gpu::PlaneSurface;
use parallax_core::{
    command_for_key, pointer_signal, AppConfig, AppState, Command, CursorSignal, CursorTracker,
    FrameLoop, FrameTime, HeadPoseScale, LatestCursor, LoadOutcome, LoadTicket, LoopControl,
    NeutralCursor, ReloadCoordinator, SceneSlot, SettingsEdit, Stopwatch, SyntheticCursor,
    TrackerMode, Viewport,
};
use std::path::PathBuf;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

mod loader;
mod render;

const TITLE: &str = "Depth Parallax";

#[derive(Debug, Parser)]
#[command(name = "parallax-native", about = "Depth-parallax photo viewer")]
struct Cli {
    /// Directory the image paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Extra options in URL query form, e.g. "keys=1,2,3&depth=suffix&rotate=8"
    #[arg(long, value_name = "QUERY", default_value = "")]
    query: String,

    #[arg(long, value_name = "PX")]
    x_threshold: Option<f32>,

    #[arg(long, value_name = "PX")]
    y_threshold: Option<f32>,

    #[arg(long)]
    strength: Option<f32>,

    /// Image key to start with
    #[arg(long, value_name = "KEY")]
    image: Option<String>,

    /// Cursor source: pointer, synthetic or none (auto behaves like pointer)
    #[arg(long, default_value = "pointer")]
    tracker: TrackerMode,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn build_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();
    config.apply_query(&cli.query).context("parsing --query")?;
    config.tracker = cli.tracker;
    let edits = [
        cli.x_threshold.map(SettingsEdit::XThreshold),
        cli.y_threshold.map(SettingsEdit::YThreshold),
        cli.strength.map(SettingsEdit::Strength),
        cli.image.clone().map(SettingsEdit::ImageKey),
    ];
    for edit in edits.into_iter().flatten() {
        config
            .settings
            .apply(edit)
            .context("applying command-line settings")?;
    }
    Ok(config)
}

fn viewport_of(size: PhysicalSize<u32>, scale_factor: f64) -> Viewport {
    let scale = scale_factor.max(f64::EPSILON);
    Viewport::new(
        (size.width as f64 / scale) as f32,
        (size.height as f64 / scale) as f32,
        scale_factor,
    )
}

/// Translate a winit key to the DOM key name the shared controls use.
fn key_name(key: &Key) -> Option<&str> {
    match key {
        Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft"),
        Key::Named(NamedKey::ArrowRight) => Some("ArrowRight"),
        Key::Named(NamedKey::ArrowUp) => Some("ArrowUp"),
        Key::Named(NamedKey::ArrowDown) => Some("ArrowDown"),
        Key::Character(s) => Some(s.as_str()),
        _ => None,
    }
}

struct Viewer<'w> {
    gpu: render::GpuState<'w>,
    state: AppState,
    frame_loop: FrameLoop,
    clock: Stopwatch,
    tracker: Box<dyn CursorTracker>,
    pointer: LatestCursor,
    coordinator: ReloadCoordinator,
    slot: SceneSlot<PlaneSurface>,
    tickets: Sender<LoadTicket>,
    outcomes: Receiver<LoadOutcome>,
    show_settings: bool,
}

impl<'w> Viewer<'w> {
    fn frame(&mut self) -> LoopControl {
        let mut time = None;
        let control = self.frame_loop.step(self.clock.now_sec(), |t| time = Some(t));
        if let Some(t) = time {
            self.tick(t);
        }
        control
    }

    fn tick(&mut self, t: FrameTime) {
        while let Ok(outcome) = self.outcomes.try_recv() {
            let gpu = &self.gpu;
            let resized = self.state.apply_completion(
                &mut self.coordinator,
                &mut self.slot,
                outcome,
                |pair| Ok::<_, anyhow::Error>(gpu.create_plane_surface(pair)),
            );
            if resized.is_some() {
                self.refresh_title(None);
            }
        }

        let signal = self.tracker.sample(t.elapsed);
        let out = self.state.tick(t, signal);
        match self.gpu.render(self.slot.live(), &out.uniforms) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = self.gpu.window.inner_size();
                self.gpu.resize(size.width, size.height);
            }
            Err(e) => log::warn!("[gpu] frame skipped: {:?}", e),
        }
        if let Some(req) = out.reload {
            self.start_load(&req.key);
        }
        if let Some(last) = self.state.take_notices().last() {
            self.refresh_title(Some(&last.to_string()));
        }
    }

    fn start_load(&mut self, key: &str) {
        match self.coordinator.request(key) {
            Ok(ticket) => {
                if self.tickets.send(ticket).is_err() {
                    log::error!("[load] loader thread is gone");
                }
            }
            Err(e) => self.state.notice(e),
        }
        self.refresh_title(None);
    }

    fn on_resize(&mut self, size: PhysicalSize<u32>) {
        let outcome = self
            .state
            .apply_resize(viewport_of(size, self.gpu.window.scale_factor()));
        // The swapchain has to match the window; the pixel ratio cap only
        // affects the reported drawing-buffer size here.
        log::debug!("[resize] drawing buffer {:?}", outcome.surface_size);
        self.gpu.resize(size.width, size.height);
    }

    fn on_cursor(&self, x: f64, y: f64) {
        let size = self.gpu.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return;
        }
        let uv = [
            (x / size.width as f64) as f32,
            (y / size.height as f64) as f32,
        ];
        self.pointer
            .publish(pointer_signal(uv, &HeadPoseScale::default()));
    }

    fn on_command(&mut self, cmd: Command) {
        let edit = match cmd {
            Command::Edit(edit) => edit,
            Command::SelectDigit(d) => match self.state.playlist().key_for_digit(d) {
                Some(key) => SettingsEdit::ImageKey(key.to_string()),
                None => return,
            },
            Command::NextImage => {
                if let Some(req) = self.state.next_image() {
                    self.start_load(&req.key);
                }
                return;
            }
            Command::ToggleOverlay => {
                self.show_settings = !self.show_settings;
                self.refresh_title(None);
                return;
            }
        };
        if let Ok(true) = self.state.commit(edit) {
            self.refresh_title(None);
        }
    }

    fn refresh_title(&self, notice: Option<&str>) {
        let s = self.state.settings();
        let mut title = TITLE.to_string();
        if self.show_settings {
            let t = s.threshold();
            title.push_str(&format!(
                " - {} | {:.0} x {:.0} | strength {:.1}",
                s.image_key(),
                t.x,
                t.y,
                s.strength()
            ));
        }
        if let Some(n) = notice {
            title.push_str(&format!(" - {}", n));
        }
        self.gpu.window.set_title(&title);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let config = build_config(&cli)?;
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new().with_title(TITLE).build(&event_loop)?;
    let gpu = pollster::block_on(render::GpuState::new(&window)).context("initializing wgpu")?;

    let (ticket_tx, ticket_rx) = crossbeam_channel::unbounded();
    let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded();
    let _loader = loader::spawn_loader(cli.root.clone(), ticket_rx, outcome_tx)
        .context("starting image loader")?;

    let pointer = LatestCursor::new();
    let tracker: Box<dyn CursorTracker> = match config.tracker {
        TrackerMode::Pointer | TrackerMode::Auto => Box::new(pointer.clone()),
        TrackerMode::Synthetic => Box::new(SyntheticCursor::default()),
        TrackerMode::None => Box::new(NeutralCursor),
        TrackerMode::Head => {
            log::warn!("[tracker] head tracking needs the web front-end; view stays centered");
            Box::new(NeutralCursor)
        }
    };

    let frame_loop = FrameLoop::default();
    let stop = frame_loop.stop_token();
    let mut viewer = Viewer {
        state: AppState::new(&config, viewport_of(window.inner_size(), window.scale_factor())),
        gpu,
        frame_loop,
        clock: Stopwatch::start(),
        tracker,
        pointer,
        coordinator: ReloadCoordinator::new(config.convention.clone()),
        slot: SceneSlot::new(),
        tickets: ticket_tx,
        outcomes: outcome_rx,
        show_settings: true,
    };
    viewer.refresh_title(None);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => viewer.on_resize(size),
            WindowEvent::CloseRequested => stop.cancel(),
            WindowEvent::CursorMoved { position, .. } => viewer.on_cursor(position.x, position.y),
            WindowEvent::CursorLeft { .. } => viewer.pointer.publish(CursorSignal::NEUTRAL),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(cmd) = key_name(&logical_key).and_then(command_for_key) {
                    viewer.on_command(cmd);
                }
            }
            _ => {}
        },
        Event::AboutToWait => {
            if viewer.frame() == LoopControl::Stop {
                elwt.exit();
            } else {
                viewer.gpu.window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
