use log::{debug, warn};

use crate::{
    config::{InterpolationMethod, LoopConfig},
    frame::{FrameConstitution, FrameReport},
    simulation::Simulation,
    telemetry::{LoopMetrics, Telemetry},
    time::{Clock, Time},
};

/// Alpha never reaches 1 while blending; a full period would already have been consumed.
const ALPHA_MAX: f32 = 0.999_999;

/// Fixed-step update loop decoupled from rendering.
///
/// Each `tick` accumulates elapsed time, runs whole `update` steps of
/// `1 / update_rate` seconds (at most `max_catch_up_steps` of them), then
/// renders if the render cadence allows it, blending `previous -> current`
/// by the leftover budget.
///
/// Catch-up policy: when the cap is hit the remaining budget is discarded
/// entirely, so a long stall never turns into a burst of late updates.
pub struct Scheduler<S: Simulation> {
    sim: S,
    cfg: LoopConfig,
    constitution: FrameConstitution,

    previous: S::State,
    current: S::State,

    accumulator: f64,
    since_render: Option<f64>,
    last_now: Option<f64>,

    time: Time,
    telemetry: Telemetry,
}

impl<S: Simulation> Scheduler<S> {
    /// Both retained snapshots start as `bootstrap`, so the first render is
    /// well-defined even before any update has run.
    pub fn new(cfg: LoopConfig, sim: S, bootstrap: S::State) -> Self
    where
        S::State: Clone,
    {
        let constitution = FrameConstitution::from_config(&cfg);
        let telemetry = Telemetry::new(constitution.rate_sample_period_sec, constitution.log_rates);

        Self {
            sim,
            time: Time::new(constitution.update_period_sec.map(|p| p as f32)),
            cfg,
            constitution,
            previous: bootstrap.clone(),
            current: bootstrap,
            accumulator: 0.0,
            since_render: None,
            last_now: None,
            telemetry,
        }
    }

    /// Runs one loop iteration at timestamp `now_sec`.
    ///
    /// The first call only sets the baseline. A timestamp earlier than the
    /// previous one counts as zero elapsed time and becomes the new baseline.
    pub fn tick(&mut self, now_sec: f64) -> FrameReport {
        let elapsed = match self.last_now {
            _ if !now_sec.is_finite() => {
                debug!("ignoring non-finite timestamp {now_sec}");
                0.0
            }
            None => {
                self.last_now = Some(now_sec);
                0.0
            }
            Some(last) if now_sec < last => {
                debug!("clock went backward by {:.6}s; treating as zero elapsed", last - now_sec);
                self.last_now = Some(now_sec);
                0.0
            }
            Some(last) => {
                self.last_now = Some(now_sec);
                now_sec - last
            }
        };

        self.advance(elapsed)
    }

    #[inline]
    pub fn tick_clock<C: Clock + ?Sized>(&mut self, clock: &C) -> FrameReport {
        self.tick(clock.now_sec())
    }

    /// Runs one loop iteration with an explicit elapsed time.
    ///
    /// Negative and non-finite values count as zero.
    pub fn advance(&mut self, elapsed_sec: f64) -> FrameReport {
        let raw = if elapsed_sec.is_finite() && elapsed_sec > 0.0 {
            elapsed_sec
        } else {
            0.0
        };

        let dt = match self.constitution.max_frame_delta_sec {
            Some(max) if raw > max => {
                debug!("frame delta {raw:.3}s clamped to {max:.3}s");
                max
            }
            _ => raw,
        };

        self.time.t_sec += dt;
        self.time.frame_index += 1;

        let (update_steps, dropped_steps) = self.run_updates(dt);

        let alpha = self.alpha();
        self.time.fixed_alpha = alpha;

        let rendered = self.render_due(dt);
        if rendered {
            self.render(alpha);
            self.time.frames_rendered += 1;
        }

        self.telemetry
            .frame_tick(raw, update_steps, rendered, alpha, dropped_steps);

        FrameReport {
            frame_index: self.time.frame_index,
            dt_sec: dt,
            fixed_dt_sec: self.time.fixed_dt_sec,
            alpha,
            update_steps,
            dropped_steps,
            rendered,
            fixed_tick: self.time.fixed_tick_index,
        }
    }

    fn run_updates(&mut self, dt: f64) -> (u32, u64) {
        let Some(period) = self.constitution.update_period_sec else {
            if dt > 0.0 {
                self.step(dt as f32);
                return (1, 0);
            }
            return (0, 0);
        };

        self.accumulator += dt;

        // Capped catch-up (anti spiral-of-death).
        let mut steps: u32 = 0;
        while self.accumulator >= period {
            if steps >= self.constitution.max_catch_up_steps {
                let dropped = (self.accumulator / period).floor() as u64;
                warn!(
                    "update catch-up capped at {steps} step(s); dropping {dropped} step(s) ({:.3}s)",
                    self.accumulator
                );
                self.accumulator = 0.0;
                self.time.dropped_steps += dropped;
                return (steps, dropped);
            }

            self.step(period as f32);
            self.accumulator -= period;
            steps += 1;
        }

        (steps, 0)
    }

    fn step(&mut self, dt: f32) {
        let next = self.sim.update(&self.current, dt);
        self.previous = std::mem::replace(&mut self.current, next);
        self.time.fixed_tick_index += 1;
    }

    fn alpha(&self) -> f32 {
        match (self.constitution.interpolation, self.constitution.update_period_sec) {
            (InterpolationMethod::LinearBlend, Some(period)) => {
                ((self.accumulator / period) as f32).clamp(0.0, ALPHA_MAX)
            }
            _ => 1.0,
        }
    }

    fn render_due(&mut self, dt: f64) -> bool {
        let Some(period) = self.constitution.render_period_sec else {
            return true;
        };

        let since = match self.since_render {
            None => {
                self.since_render = Some(0.0);
                return true;
            }
            Some(s) => s + dt,
        };

        if since < period {
            self.since_render = Some(since);
            return false;
        }

        let rest = since - period;
        self.since_render = Some(if rest < period { rest } else { 0.0 });
        true
    }

    fn render(&mut self, alpha: f32) {
        let blend = self.constitution.interpolation == InterpolationMethod::LinearBlend
            && self.constitution.update_period_sec.is_some();

        if blend {
            let blended = self.sim.interpolate(&self.previous, &self.current, alpha);
            self.sim.render(&blended);
        } else {
            self.sim.render(&self.current);
        }
    }

    fn reconstitute(&mut self) {
        self.constitution = FrameConstitution::from_config(&self.cfg);
        self.time.fixed_dt_sec = self.constitution.update_period_sec.map(|p| p as f32);

        match self.constitution.update_period_sec {
            None => self.accumulator = 0.0,
            Some(period) if self.accumulator >= period => {
                self.accumulator %= period;
            }
            Some(_) => {}
        }
    }

    pub fn set_interpolation(&mut self, method: InterpolationMethod) {
        self.cfg.interpolation = method;
        self.constitution.interpolation = method;
    }

    #[inline]
    pub fn interpolation(&self) -> InterpolationMethod {
        self.constitution.interpolation
    }

    pub fn set_update_rate(&mut self, hz: f32) {
        self.cfg.update_rate = hz;
        self.reconstitute();
    }

    pub fn set_frame_rate(&mut self, hz: f32) {
        self.cfg.frame_rate = hz;
        self.reconstitute();
    }

    pub fn set_max_catch_up_steps(&mut self, steps: u32) {
        self.cfg.max_catch_up_steps = steps;
        self.reconstitute();
    }

    #[inline]
    pub fn config(&self) -> &LoopConfig {
        &self.cfg
    }

    #[inline]
    pub fn current(&self) -> &S::State {
        &self.current
    }

    #[inline]
    pub fn previous(&self) -> &S::State {
        &self.previous
    }

    /// Leftover update budget in seconds, always below one update period.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    #[inline]
    pub fn metrics(&self) -> LoopMetrics {
        self.telemetry.metrics()
    }

    #[inline]
    pub fn simulation(&self) -> &S {
        &self.sim
    }

    #[inline]
    pub fn simulation_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn into_simulation(self) -> S {
        self.sim
    }
}
