use std::time::{Duration, Instant};

/// Measures wall-clock time between frames for the game loop.
///
/// Deltas are clamped so one long stall cannot queue an unbounded number of
/// fixed ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_tick: Instant,
    max_delta: f32,
    frame_count: u64,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    pub fn starting_at(now: Instant, max_delta: f32) -> Self {
        Self {
            start: now,
            last_tick: now,
            max_delta: max_delta.max(0.0),
            frame_count: 0,
        }
    }

    /// Seconds since the previous tick, clamped to `max_delta`.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.frame_count += 1;
        raw.min(self.max_delta)
    }

    pub fn elapsed(&self) -> Duration {
        self.last_tick.saturating_duration_since(self.start)
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
