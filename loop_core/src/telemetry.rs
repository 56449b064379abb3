use log::info;

/// Events per second, sampled over a trailing window instead of per tick.
#[derive(Debug, Clone)]
pub struct RateCounter {
    period_sec: f64,
    window_sec: f64,
    window_events: u32,
    rate: f32,
}

impl RateCounter {
    pub fn new(period_sec: f64) -> Self {
        Self {
            period_sec: period_sec.max(0.25),
            window_sec: 0.0,
            window_events: 0,
            rate: 0.0,
        }
    }

    #[inline]
    pub fn record(&mut self, events: u32) {
        self.window_events = self.window_events.saturating_add(events);
    }

    /// Advances the window. Returns `true` when a new sample was taken.
    pub fn advance(&mut self, elapsed_sec: f64) -> bool {
        self.window_sec += elapsed_sec.max(0.0);
        if self.window_sec < self.period_sec {
            return false;
        }

        self.rate = (self.window_events as f64 / self.window_sec) as f32;
        self.window_sec = 0.0;
        self.window_events = 0;
        true
    }

    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopMetrics {
    pub ups: f32,
    pub fps: f32,
    pub alpha: f32,

    pub total_updates: u64,
    pub total_frames: u64,
    pub dropped_steps: u64,
}

pub struct Telemetry {
    updates: RateCounter,
    frames: RateCounter,
    log_enabled: bool,
    metrics: LoopMetrics,
}

impl Telemetry {
    pub fn new(sample_period_sec: f64, log_enabled: bool) -> Self {
        Self {
            updates: RateCounter::new(sample_period_sec),
            frames: RateCounter::new(sample_period_sec),
            log_enabled,
            metrics: LoopMetrics::default(),
        }
    }

    pub fn frame_tick(&mut self, raw_elapsed_sec: f64, updates: u32, rendered: bool, alpha: f32, dropped: u64) {
        self.updates.record(updates);
        self.frames.record(rendered as u32);

        self.metrics.alpha = alpha;
        self.metrics.total_updates += updates as u64;
        self.metrics.total_frames += rendered as u64;
        self.metrics.dropped_steps += dropped;

        self.updates.advance(raw_elapsed_sec);
        if self.frames.advance(raw_elapsed_sec) {
            self.metrics.ups = self.updates.rate();
            self.metrics.fps = self.frames.rate();

            if self.log_enabled {
                info!(
                    "fps={:.1} ups={:.1} alpha={:.2} dropped={}",
                    self.metrics.fps, self.metrics.ups, self.metrics.alpha, self.metrics.dropped_steps
                );
            }
        }
    }

    #[inline]
    pub fn metrics(&self) -> LoopMetrics {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rate_is_sampled_per_window() {
        let mut c = RateCounter::new(1.0);
        for _ in 0..7 {
            c.record(1);
            assert!(!c.advance(0.125));
        }
        assert_eq!(c.rate(), 0.0);

        c.record(1);
        assert!(c.advance(0.125));
        assert_abs_diff_eq!(c.rate(), 8.0, epsilon = 1.0e-3);
    }

    #[test]
    fn short_periods_are_raised() {
        let mut c = RateCounter::new(0.01);
        c.record(5);
        assert!(!c.advance(0.125));
        assert!(c.advance(0.125));
        assert_abs_diff_eq!(c.rate(), 20.0, epsilon = 1.0e-3);
    }

    #[test]
    fn telemetry_counts_updates_and_frames() {
        let mut t = Telemetry::new(0.5, false);
        for _ in 0..4 {
            t.frame_tick(0.125, 2, true, 0.5, 0);
        }
        let m = t.metrics();
        assert_eq!(m.total_updates, 8);
        assert_eq!(m.total_frames, 4);
        assert_abs_diff_eq!(m.ups, 16.0, epsilon = 1.0e-2);
        assert_abs_diff_eq!(m.fps, 8.0, epsilon = 1.0e-2);
    }
}
