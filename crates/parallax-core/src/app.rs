//! Application state and the per-frame update contract.
//!
//! Front-ends own one [`AppState`] and pass it by `&mut` into [`AppState::tick`]
//! once per display refresh and into [`AppState::apply_completion`] whenever
//! a queued image load finishes. Each field has exactly one writer path.

use crate::activity::{Activity, ActivityMonitor};
use crate::camera::{active_pose, ease_alpha, idle_pose, Camera};
use crate::config::AppConfig;
use crate::constants::*;
use crate::cursor::CursorSignal;
use crate::error::{ParallaxError, Result};
use crate::frame_loop::FrameTime;
use crate::image::{ImageDetails, ImagePair};
use crate::loader::{Accepted, LoadOutcome, ReloadCoordinator};
use crate::playlist::{Playlist, RotationTimer};
use crate::scene::SceneSlot;
use crate::settings::{Settings, SettingsEdit};
use crate::smoothing::SmoothedCursor;
use crate::uniforms::PlaneUniforms;
use crate::viewport::{resize_pass, ResizeOutcome, Viewport};
use glam::{Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadReason {
    Initial,
    SettingsChanged,
    Rotation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReloadRequest {
    pub key: String,
    pub reason: ReloadReason,
}

/// What one tick hands back to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutput {
    pub uniforms: PlaneUniforms,
    pub activity: Activity,
    pub reload: Option<ReloadRequest>,
}

#[derive(Debug)]
pub struct AppState {
    settings: Settings,
    playlist: Playlist,
    image: Option<ImageDetails>,
    viewport: Viewport,
    camera: Camera,
    plane_scale: Vec3,
    smoothed: SmoothedCursor,
    activity: ActivityMonitor,
    rotation: RotationTimer,
    reload_pending: Option<ReloadReason>,
    notices: Vec<ParallaxError>,
}

impl AppState {
    pub fn new(config: &AppConfig, viewport: Viewport) -> Self {
        let mut playlist = config.playlist.clone();
        if let Some(seed) = config.shuffle_seed {
            playlist.shuffle(seed);
        }
        let mut settings = config.settings.clone();
        if !playlist.select(settings.image_key()) {
            log::info!(
                "[playlist] '{}' is not listed, starting at '{}'",
                settings.image_key(),
                playlist.current()
            );
            settings.set_image_key(playlist.current());
        }
        let mut state = Self {
            settings,
            playlist,
            image: None,
            viewport,
            camera: Camera::default(),
            plane_scale: Vec3::new(PLANE_EXTENT, PLANE_EXTENT, 1.0),
            smoothed: SmoothedCursor::default(),
            activity: ActivityMonitor::new(QUIET_PERIOD_SEC, ACTIVITY_EPSILON),
            rotation: RotationTimer::new(config.rotation_interval_sec),
            reload_pending: Some(ReloadReason::Initial),
            notices: Vec::new(),
        };
        state.apply_resize(viewport);
        state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn image(&self) -> Option<&ImageDetails> {
        self.image.as_ref()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn plane_scale(&self) -> Vec3 {
        self.plane_scale
    }

    pub fn smoothed(&self) -> Vec2 {
        self.smoothed.lerp
    }

    pub fn activity(&self) -> Activity {
        self.activity.state()
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_pending.is_some()
    }

    /// Commit an edit from the configuration surface. A change schedules a
    /// reload on the next tick; a rejected value is also queued as a notice.
    pub fn commit(&mut self, edit: SettingsEdit) -> Result<bool> {
        let key_edit = match &edit {
            SettingsEdit::ImageKey(k) => Some(k.trim().to_string()),
            _ => None,
        };
        match self.settings.apply(edit) {
            Ok(changed) => {
                if let Some(key) = key_edit {
                    self.playlist.select(&key);
                }
                if changed {
                    self.reload_pending = Some(ReloadReason::SettingsChanged);
                }
                Ok(changed)
            }
            Err(e) => {
                self.notices.push(e.clone());
                Err(e)
            }
        }
    }

    /// Jump to the next playlist entry right away.
    pub fn next_image(&mut self) -> Option<ReloadRequest> {
        self.rotate(ReloadReason::SettingsChanged)
    }

    pub fn notice(&mut self, error: ParallaxError) {
        log::warn!("[notice] {}", error);
        self.notices.push(error);
    }

    pub fn take_notices(&mut self) -> Vec<ParallaxError> {
        std::mem::take(&mut self.notices)
    }

    /// Recompute camera aspect and plane scale for a new window size.
    pub fn apply_resize(&mut self, viewport: Viewport) -> ResizeOutcome {
        self.viewport = viewport;
        let outcome = resize_pass(&viewport, self.image.as_ref());
        self.camera.aspect = outcome.camera_aspect;
        if let Some(fit) = outcome.plane {
            self.plane_scale = fit.scale;
        }
        log::debug!(
            "[resize] {}x{} aspect={:.3} plane={:?}",
            outcome.surface_size.0,
            outcome.surface_size.1,
            outcome.camera_aspect,
            outcome.plane.map(|p| p.branch)
        );
        outcome
    }

    /// Route a finished load through the coordinator. On `Apply` the
    /// replacement surface is built, swapped in, and the image details and
    /// plane scale follow it; on failure the visible surface is kept.
    pub fn apply_completion<S, E>(
        &mut self,
        coordinator: &mut ReloadCoordinator,
        slot: &mut SceneSlot<S>,
        outcome: LoadOutcome,
        build: impl FnOnce(&ImagePair) -> std::result::Result<S, E>,
    ) -> Option<ResizeOutcome>
    where
        E: std::fmt::Display,
    {
        match coordinator.accept(outcome) {
            Accepted::Apply {
                ticket,
                pair,
                details,
            } => match slot.rebuild(|| build(&pair)) {
                Ok(()) => {
                    coordinator.mark_applied(ticket.generation);
                    log::info!(
                        "[load] #{} '{}' applied ({}x{})",
                        ticket.generation,
                        ticket.key,
                        details.width,
                        details.height
                    );
                    self.image = Some(details);
                    Some(self.apply_resize(self.viewport))
                }
                Err(e) => {
                    self.notice(ParallaxError::ImageLoadFailed {
                        key: ticket.key,
                        reason: e.to_string(),
                    });
                    None
                }
            },
            Accepted::Stale { .. } => None,
            Accepted::Failed(e) => {
                self.notice(e);
                None
            }
        }
    }

    /// One animation step: smooth the cursor, produce the uniforms for this
    /// frame, then ease the camera and decide on reloads for the next one.
    pub fn tick(&mut self, time: FrameTime, signal: CursorSignal) -> FrameOutput {
        let dt = time.delta;
        let strength = self.settings.strength();
        let target = signal.xy() * strength;
        let depth = signal.z.unwrap_or(0.0) * strength;

        let mouse = self.smoothed.step(target, SMOOTHING_RATE_PER_SEC, dt);
        let activity = self.activity.observe(mouse.x, time.elapsed);

        let uniforms = PlaneUniforms::new(
            self.camera.view_proj(),
            self.plane_scale,
            mouse,
            self.settings.threshold(),
        );

        let mut reload = None;
        match activity {
            Activity::Idle => {
                if self.rotation.advance(dt as f64) && self.playlist.keys().len() > 1 {
                    reload = self.rotate(ReloadReason::Rotation);
                }
                self.camera
                    .ease_toward(idle_pose(), ease_alpha(dt, CAMERA_IDLE_EASE_RATE));
            }
            Activity::Active => {
                self.rotation.reset();
                self.camera.ease_toward(
                    active_pose(signal.x, signal.y, depth),
                    ease_alpha(dt, CAMERA_ACTIVE_EASE_RATE),
                );
            }
        }

        if reload.is_none() {
            if let Some(reason) = self.reload_pending.take() {
                reload = Some(ReloadRequest {
                    key: self.settings.image_key().to_string(),
                    reason,
                });
            }
        }

        FrameOutput {
            uniforms,
            activity,
            reload,
        }
    }

    fn rotate(&mut self, reason: ReloadReason) -> Option<ReloadRequest> {
        let key = self.playlist.advance().to_string();
        match self.settings.apply(SettingsEdit::ImageKey(key.clone())) {
            Ok(_) => {
                self.reload_pending = None;
                Some(ReloadRequest { key, reason })
            }
            Err(e) => {
                self.notice(e);
                None
            }
        }
    }
}
