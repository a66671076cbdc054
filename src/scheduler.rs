//! Fixed-timestep scheduler
//!
//! Accumulates wall-clock time and releases it in uniform simulation steps,
//! so physics expressed in per-tick units behaves the same at any frame rate.

use crate::consts::{MAX_FRAME_DT, SIM_DT};

/// Accumulator that converts variable frame deltas into fixed steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_frame_dt: f64,
    accumulator: f64,
    total_steps: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_FRAME_DT)
    }
}

impl FixedTimestep {
    /// `step` is the simulation interval, `max_frame_dt` caps one frame's delta
    pub fn new(step: f32, max_frame_dt: f32) -> Self {
        let step = (step as f64).max(1e-6);
        Self {
            step,
            max_frame_dt: (max_frame_dt as f64).max(step),
            accumulator: 0.0,
            total_steps: 0,
        }
    }

    /// Feed one frame's wall delta and run `step_fn` once per whole step.
    /// Returns how many steps ran.
    pub fn tick(&mut self, wall_dt: f32, mut step_fn: impl FnMut(f32)) -> u32 {
        let wall_dt = wall_dt as f64;
        // NaN and negative deltas count as no time
        let wall_dt = if wall_dt > 0.0 { wall_dt } else { 0.0 };
        let wall_dt = wall_dt.min(self.max_frame_dt);
        self.accumulator += wall_dt;

        let mut steps = 0;
        while self.accumulator >= self.step {
            step_fn(self.step as f32);
            self.accumulator -= self.step;
            steps += 1;
        }
        self.total_steps += steps as u64;
        steps
    }

    /// Fraction of a step left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step) as f32
    }

    pub fn step(&self) -> f32 {
        self.step as f32
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Drop any banked time (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
