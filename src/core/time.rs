//! Time Manager
//!
//! Wall-clock tracking for the frame loop, plus the accumulator that turns
//! variable frame deltas into whole 60 Hz simulation steps.

use std::time::Instant;

/// Simulation update rate in steps per second.
pub const STEPS_PER_SECOND: u32 = 60;

/// Fixed timestep for simulation updates (60 Hz).
pub const FIXED_TIMESTEP: f32 = 1.0 / STEPS_PER_SECOND as f32;

/// Maximum frame delta fed into the accumulator.
/// Caps catch-up work after a long stall so one bad frame cannot schedule
/// an unbounded number of simulation steps.
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Time manager for tracking frame timing and elapsed time.
///
/// Provides delta_time for the game loop and total elapsed time
/// since application start.
pub struct Time {
    /// Time when the application started.
    startup: Instant,
    /// Time of the last frame.
    last_frame: Instant,
    /// Time elapsed since the last frame (in seconds).
    delta_time: f32,
    /// Total time elapsed since startup (in seconds).
    elapsed_time: f64,
}

impl Time {
    /// Creates a new Time manager, initializing startup time to now.
    pub fn new() -> Self {
        let current = Instant::now();
        Self {
            startup: current,
            last_frame: current,
            delta_time: 0.0,
            elapsed_time: 0.0,
        }
    }

    /// Updates the time manager. Call this once per frame.
    ///
    /// Calculates delta_time since the last call and updates elapsed_time.
    pub fn update(&mut self) {
        let current = Instant::now();
        self.delta_time = current.duration_since(self.last_frame).as_secs_f32();
        self.elapsed_time = current.duration_since(self.startup).as_secs_f64();
        self.last_frame = current;
    }

    /// Returns the time elapsed since the last frame in seconds.
    #[inline]
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Returns the total time elapsed since application start in seconds.
    #[inline]
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

/// Accumulator that converts frame deltas into whole simulation steps.
///
/// Each frame feeds its delta through [`FixedTimestep::advance`], which
/// returns how many fixed steps are due: zero when rendering outpaces the
/// simulation rate, several when a frame ran long. Whatever fraction of a
/// step is left over carries into the next frame, so the long-run step count
/// depends only on total elapsed time, not on how it arrived in deltas.
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Feeds one frame delta and returns the number of simulation steps due.
    ///
    /// The delta is clamped to [`MAX_FRAME_TIME`] before accumulating. After
    /// this returns, the remaining accumulator is always in
    /// `[0, FIXED_TIMESTEP)`.
    pub fn advance(&mut self, delta: f32) -> u32 {
        self.accumulator += delta.min(MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }
        steps
    }

    /// Unconsumed time waiting for the next step, in seconds.
    #[allow(dead_code)]
    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new()
    }
}
