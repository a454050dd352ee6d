//! Time management utilities

use std::time::Instant;

/// Wall-clock timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Accumulator turning variable frame times into fixed simulation ticks
///
/// Each call to [`FixedTimestep::advance`] banks the frame time and reports
/// how many whole ticks of [`FixedTimestep::step`] seconds are due. At most
/// `max_steps` ticks are reported per frame; the surplus is dropped so a long
/// stall does not snowball into ever longer frames.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// Create an accumulator ticking every `step` seconds
    pub fn new(step: f32, max_steps: u32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Tick length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time banked towards the next tick
    pub fn accumulated(&self) -> f32 {
        self.accumulator
    }

    /// Bank `frame_time` seconds and return the number of ticks to run
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        if self.step.is_nan() || self.step <= 0.0 || !frame_time.is_finite() || frame_time <= 0.0 {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < self.max_steps {
            self.accumulator -= self.step;
            ticks += 1;
        }

        if ticks == self.max_steps && self.accumulator >= self.step {
            log::debug!(
                "Fixed timestep fell behind, dropping {:.4}s",
                self.accumulator
            );
            self.accumulator %= self.step;
        }

        ticks
    }

    /// Discard banked time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
