use crate::config::{InterpolationMethod, LoopConfig};

/// Cadence derived from `LoopConfig`, with disabled rates folded into `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConstitution {
    pub update_period_sec: Option<f64>,
    pub render_period_sec: Option<f64>,
    pub max_catch_up_steps: u32,
    pub max_frame_delta_sec: Option<f64>,
    pub interpolation: InterpolationMethod,

    pub log_rates: bool,
    pub rate_sample_period_sec: f64,
}

impl FrameConstitution {
    pub fn from_config(cfg: &LoopConfig) -> Self {
        let update_period_sec = period_of(cfg.update_rate);
        let max_catch_up_steps = cfg.max_catch_up_steps.max(1);

        // Never below what one capped catch-up consumes.
        let max_frame_delta_sec = (cfg.max_frame_delta_sec > 0.0).then(|| match update_period_sec {
            Some(period) => cfg.max_frame_delta_sec.max(max_catch_up_steps as f64 * period),
            None => cfg.max_frame_delta_sec,
        });

        Self {
            update_period_sec,
            render_period_sec: period_of(cfg.frame_rate),
            max_catch_up_steps,
            max_frame_delta_sec,
            interpolation: cfg.interpolation,
            log_rates: cfg.log_rates,
            rate_sample_period_sec: cfg.rate_sample_period_sec.max(0.25),
        }
    }
}

/// `1 / hz`, or `None` when the cadence is disabled.
pub(crate) fn period_of(hz: f32) -> Option<f64> {
    (hz.is_finite() && hz > 0.0).then(|| 1.0 / hz as f64)
}

/// What one `tick` did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,

    /// Elapsed time consumed by this tick after clamping.
    pub dt_sec: f64,

    /// Fixed update period, `None` when updates run once per tick.
    pub fixed_dt_sec: Option<f32>,

    /// Blend factor handed to interpolation. `1.0` when `current` was rendered as-is.
    pub alpha: f32,

    /// Update calls made during this tick.
    pub update_steps: u32,

    /// Whole update periods discarded because the catch-up cap was hit.
    pub dropped_steps: u64,

    pub rendered: bool,

    /// Total update calls since the scheduler was created.
    pub fixed_tick: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_rates_disable_cadence() {
        assert_eq!(period_of(0.0), None);
        assert_eq!(period_of(-5.0), None);
        assert_eq!(period_of(f32::NAN), None);
        assert_eq!(period_of(4.0), Some(0.25));
    }

    #[test]
    fn constitution_clamps_limits() {
        let cfg = LoopConfig::default()
            .with_max_catch_up_steps(0)
            .with_max_frame_delta_sec(0.0);
        let c = FrameConstitution::from_config(&cfg);
        assert_eq!(c.max_catch_up_steps, 1);
        assert_eq!(c.max_frame_delta_sec, None);
        assert_eq!(c.update_period_sec, Some(1.0 / 10.0f32 as f64));
    }

    #[test]
    fn stall_clamp_covers_a_full_catch_up() {
        let c = FrameConstitution::from_config(&LoopConfig::default());
        assert_eq!(c.max_frame_delta_sec, Some(8.0 * 0.1));

        let c = FrameConstitution::from_config(
            &LoopConfig::default()
                .with_update_rate(4.0)
                .with_max_catch_up_steps(2)
                .with_max_frame_delta_sec(3.0),
        );
        assert_eq!(c.max_frame_delta_sec, Some(3.0));

        let c = FrameConstitution::from_config(&LoopConfig::default().with_update_rate(0.0));
        assert_eq!(c.max_frame_delta_sec, Some(0.25));
    }
}
