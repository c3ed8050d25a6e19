//! Fixed-timestep accumulator.
//!
//! Converts variable frame times into a whole number of fixed ticks. Time
//! that would require more than `max_steps_per_frame` ticks is dropped so a
//! slow frame cannot snowball into ever-longer catch-up frames.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    timestep: f64,
    accumulator: f64,
    max_steps_per_frame: u32,
}

impl FixedStepClock {
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    /// `timestep` must be positive and finite; config validation ensures it.
    #[must_use]
    pub fn new(timestep: f32, max_steps_per_frame: u32) -> Self {
        debug_assert!(timestep.is_finite() && timestep > 0.0);
        Self {
            timestep: f64::from(timestep),
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
        }
    }

    #[must_use]
    pub fn timestep(&self) -> Duration {
        Duration::from_secs_f64(self.timestep)
    }

    /// Unconsumed time carried into the next frame, always below one step.
    #[must_use]
    pub fn pending(&self) -> f64 {
        self.accumulator
    }

    /// Feeds `dt` of wall time and returns how many ticks to run now.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.accumulator += dt.as_secs_f64();
        let due = (self.accumulator / self.timestep).floor();
        if due > f64::from(self.max_steps_per_frame) {
            tracing::debug!(
                due = due as u64,
                cap = self.max_steps_per_frame,
                "Dropping simulation time beyond per-frame cap"
            );
            self.accumulator = 0.0;
            self.max_steps_per_frame
        } else {
            self.accumulator -= due * self.timestep;
            due as u32
        }
    }
}
