//! Cooperative per-refresh loop with explicit cancellation.
//!
//! Front-ends call [`FrameLoop::step`] from their display callback
//! (requestAnimationFrame, winit `AboutToWait`) and only reschedule while it
//! returns [`LoopControl::Continue`]. Tests drive it with synthetic time.

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the loop started.
    pub elapsed: f64,
    /// Seconds since the previous frame (0 on the first).
    pub delta: f32,
    pub frame: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Shared cancellation flag. Any clone can stop the loop.
#[derive(Clone, Debug, Default)]
pub struct StopToken(Rc<Cell<bool>>);

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Wall clock reading seconds since construction.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch(Instant);

impl Stopwatch {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn now_sec(&self) -> f64 {
        self.0.elapsed().as_secs_f64()
    }
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    stop: StopToken,
    previous: Option<f64>,
    frame: u64,
}

impl FrameLoop {
    pub fn new(stop: StopToken) -> Self {
        Self {
            stop,
            previous: None,
            frame: 0,
        }
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Run one frame at `now_sec`. Ticks never overlap: the callback runs to
    /// completion before this returns.
    pub fn step(&mut self, now_sec: f64, tick: impl FnOnce(FrameTime)) -> LoopControl {
        if self.stop.is_cancelled() {
            return LoopControl::Stop;
        }
        let delta = match self.previous {
            Some(prev) => (now_sec - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.previous = Some(now_sec);
        tick(FrameTime {
            elapsed: now_sec,
            delta,
            frame: self.frame,
        });
        self.frame += 1;
        if self.stop.is_cancelled() {
            LoopControl::Stop
        } else {
            LoopControl::Continue
        }
    }

    /// Deterministic bounded run with a fixed timestep, starting at t = 0.
    /// Returns the number of frames executed.
    pub fn run_fixed(&mut self, frames: u64, dt_sec: f64, mut tick: impl FnMut(FrameTime)) -> u64 {
        let start = self.frame;
        for i in 0..frames {
            let now = self.previous.map(|p| p + dt_sec).unwrap_or(i as f64 * dt_sec);
            if self.step(now, &mut tick) == LoopControl::Stop {
                break;
            }
        }
        self.frame - start
    }
}
