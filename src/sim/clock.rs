//! Fixed-step frame clock
//!
//! Hosts call [`FrameClock::advance`] from their animation callback with the
//! wall-clock time since the previous callback and run the returned number of
//! simulation steps. Display rates other than 60 Hz then play at the same speed.

use crate::consts::{FRAME_DT, MAX_SUBSTEPS};

/// Longest host frame we try to catch up on (seconds)
const MAX_FRAME_DELTA: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    /// Host timestamp (ms) of the previous callback, if any
    last_time: Option<f64>,
    /// Total simulation steps handed out
    pub steps: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed elapsed seconds, get the number of fixed steps to run
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        let dt = elapsed_secs.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= FRAME_DT;
            substeps += 1;
        }
        // Drop the backlog we refused to simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_DT);
        }

        self.steps += substeps as u64;
        substeps
    }

    /// Feed a host timestamp in milliseconds (e.g. requestAnimationFrame time)
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            // First frame always runs exactly one step
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(elapsed)
    }

    /// Interpolation factor between the last two steps (0..1)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / FRAME_DT).clamp(0.0, 1.0)
    }

    /// Forget accumulated time (after pause/resume or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}
