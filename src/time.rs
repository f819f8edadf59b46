//! Fixed-timestep clock for the render loop.
//!
//! `draw_web()` runs at the browser's frame rate. [`FrameClock`] turns the
//! wall-clock timestamps into whole game ticks (for toasts and redirects) and
//! also reports the clamped frame delta, which the transition effects consume.

/// Longest frame delta accepted; a backgrounded tab resumes without a burst.
const MAX_FRAME_MS: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStep {
    /// Whole ticks elapsed this frame.
    pub ticks: u32,
    /// Clamped milliseconds since the previous frame.
    pub delta_ms: u32,
}

pub struct FrameClock {
    ms_per_tick: f64,
    /// Milliseconds not yet turned into a tick.
    accumulator: f64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed the current timestamp (`performance.now()`), once per frame.
    pub fn advance(&mut self, now_ms: f64) -> FrameStep {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;

        FrameStep {
            ticks,
            delta_ms: delta.round() as u32,
        }
    }
}
