//! Elapsed-time accumulators advanced once per UI tick. They stand in for
//! delayed callbacks: nothing runs concurrently and cancelling is just
//! disarming.

// Frame deltas summed in f32 undershoot round durations by a few ulps
// (60 x 1/60 s lands just below 1.0), so deadlines compare with slack.
const DEADLINE_SLACK: f32 = 1e-4;

#[inline]
fn reached(elapsed: f32, duration: f32) -> bool {
    elapsed + DEADLINE_SLACK >= duration
}

/// Fires once after `duration` seconds of accumulated ticks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DelayTimer {
    elapsed: f32,
    duration: f32,
    armed: bool,
}

impl DelayTimer {
    pub fn arm(&mut self, duration: f32) {
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.armed = true;
    }

    pub fn cancel(&mut self) {
        self.armed = false;
        self.elapsed = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns true exactly once, on the tick that crosses the deadline.
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.elapsed += dt.max(0.0);
        if reached(self.elapsed, self.duration) {
            self.armed = false;
            return true;
        }
        false
    }
}

/// Linear 1 → 0 ramp. Lands on exactly 0 once the duration has elapsed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FadeRamp {
    elapsed: f32,
    duration: f32,
    active: bool,
}

impl FadeRamp {
    pub fn begin(&mut self, duration: f32) {
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 || reached(self.elapsed, self.duration) {
            return 0.0;
        }
        (1.0 - self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Advance and return the new value; `None` when not running.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let v = self.value();
        if v <= 0.0 {
            self.active = false;
        }
        Some(v)
    }
}
