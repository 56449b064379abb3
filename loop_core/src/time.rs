use std::{cell::Cell, time::Instant};

/// Monotonic time source in seconds. Only differences between readings matter.
pub trait Clock {
    fn now_sec(&self) -> f64;
}

/// Wall clock backed by `Instant`, zeroed at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for tests and replays. Accepts any value, including going backward.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_sec: f64) -> Self {
        Self { now: Cell::new(start_sec) }
    }

    #[inline]
    pub fn set(&self, now_sec: f64) {
        self.now.set(now_sec);
    }

    #[inline]
    pub fn advance(&self, dt_sec: f64) {
        self.now.set(self.now.get() + dt_sec);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now_sec(&self) -> f64 {
        self.now.get()
    }
}

/// Running counters of the loop, as seen by the last tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    /// Elapsed time fed into the loop after clamping.
    pub t_sec: f64,
    pub frame_index: u64,

    pub fixed_tick_index: u64,
    pub fixed_alpha: f32,
    /// `None` while the update cadence is disabled.
    pub fixed_dt_sec: Option<f32>,

    pub frames_rendered: u64,
    pub dropped_steps: u64,
}

impl Time {
    pub fn new(fixed_dt_sec: Option<f32>) -> Self {
        Self {
            t_sec: 0.0,
            frame_index: 0,
            fixed_tick_index: 0,
            fixed_alpha: 0.0,
            fixed_dt_sec,
            frames_rendered: 0,
            dropped_steps: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let clock = ManualClock::new(1.5);
        assert_eq!(clock.now_sec(), 1.5);
        clock.advance(0.25);
        assert_eq!(clock.now_sec(), 1.75);
        clock.set(0.5);
        assert_eq!(clock.now_sec(), 0.5);
    }

    #[test]
    fn monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let a = clock.now_sec();
        let b = clock.now_sec();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
