//! Idle/active detection over the smoothed X offset.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activity {
    Idle,
    Active,
}

#[derive(Clone, Debug)]
pub struct ActivityMonitor {
    quiet_period_sec: f64,
    epsilon: f32,
    anchor: f32,
    last_change_sec: f64,
    state: Activity,
}

impl ActivityMonitor {
    pub fn new(quiet_period_sec: f64, epsilon: f32) -> Self {
        Self {
            quiet_period_sec,
            epsilon,
            anchor: 0.0,
            last_change_sec: 0.0,
            state: Activity::Active,
        }
    }

    pub fn state(&self) -> Activity {
        self.state
    }

    /// Seconds since the observed value last moved.
    pub fn static_for(&self, now_sec: f64) -> f64 {
        (now_sec - self.last_change_sec).max(0.0)
    }

    /// Record the value seen this frame and return the resulting state.
    pub fn observe(&mut self, value: f32, now_sec: f64) -> Activity {
        if (value - self.anchor).abs() > self.epsilon {
            self.anchor = value;
            self.last_change_sec = now_sec;
        }
        let next = if self.static_for(now_sec) > self.quiet_period_sec {
            Activity::Idle
        } else {
            Activity::Active
        };
        if next != self.state {
            log::debug!("[activity] {:?} -> {:?} at {:.2}s", self.state, next, now_sec);
            self.state = next;
        }
        next
    }
}
