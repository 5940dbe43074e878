use std::time::{Duration, Instant};

/// Timing of a single tick, in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Since the clock started
    pub elapsed: f32,
    /// Since the previous tick
    pub delta: f32,
}

/// Frame clock anchored at its creation time
#[derive(Debug)]
pub struct Clock {
    origin: Instant,
    previous: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            previous: origin,
        }
    }

    /// Seconds since start, without advancing
    pub fn elapsed(&self) -> f32 {
        self.origin.elapsed().as_secs_f32()
    }

    /// Sample both timings at one instant and make it the new previous tick
    pub fn tick(&mut self) -> Tick {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Tick {
        let since = |earlier: Instant| now.saturating_duration_since(earlier).as_secs_f32();
        let tick = Tick {
            elapsed: since(self.origin),
            delta: since(self.previous),
        };
        self.previous = now;
        tick
    }

    /// Time since the previous tick, without advancing
    pub fn since_last_tick(&self) -> Duration {
        self.previous.elapsed()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
