use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How render-time state is derived from the two retained simulation snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Render the latest snapshot as-is. Stutters when rates differ.
    None,
    /// Blend `previous -> current` by the leftover update budget.
    #[default]
    LinearBlend,
}

impl InterpolationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            InterpolationMethod::None => "none",
            InterpolationMethod::LinearBlend => "linear_blend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Fixed updates per second. `<= 0` runs one variable update per tick.
    #[serde(default = "default_update_rate")]
    pub update_rate: f32,
    /// Render cap in frames per second. `<= 0` renders every tick.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
    #[serde(default)]
    pub interpolation: InterpolationMethod,
    #[serde(default = "default_max_catch_up_steps")]
    pub max_catch_up_steps: u32,
    /// Upper bound for a single tick's elapsed time, never below
    /// `max_catch_up_steps` update periods. `<= 0` disables the clamp.
    #[serde(default = "default_max_frame_delta_sec")]
    pub max_frame_delta_sec: f64,
    #[serde(default)]
    pub log_rates: bool,
    #[serde(default = "default_rate_sample_period_sec")]
    pub rate_sample_period_sec: f64,
}

fn default_update_rate() -> f32 { 10.0 }
fn default_frame_rate() -> f32 { 60.0 }
fn default_max_catch_up_steps() -> u32 { 8 }
fn default_max_frame_delta_sec() -> f64 { 0.25 }
fn default_rate_sample_period_sec() -> f64 { 1.0 }

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            update_rate: default_update_rate(),
            frame_rate: default_frame_rate(),
            interpolation: InterpolationMethod::default(),
            max_catch_up_steps: default_max_catch_up_steps(),
            max_frame_delta_sec: default_max_frame_delta_sec(),
            log_rates: false,
            rate_sample_period_sec: default_rate_sample_period_sec(),
        }
    }
}

impl LoopConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn with_update_rate(mut self, hz: f32) -> Self {
        self.update_rate = hz;
        self
    }

    pub fn with_frame_rate(mut self, hz: f32) -> Self {
        self.frame_rate = hz;
        self
    }

    pub fn with_interpolation(mut self, method: InterpolationMethod) -> Self {
        self.interpolation = method;
        self
    }

    pub fn with_max_catch_up_steps(mut self, steps: u32) -> Self {
        self.max_catch_up_steps = steps;
        self
    }

    pub fn with_max_frame_delta_sec(mut self, sec: f64) -> Self {
        self.max_frame_delta_sec = sec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = LoopConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, LoopConfig::default());
        assert_eq!(cfg.update_rate, 10.0);
        assert_eq!(cfg.frame_rate, 60.0);
        assert_eq!(cfg.interpolation, InterpolationMethod::LinearBlend);
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = LoopConfig::from_toml_str(
            r#"
            update_rate = 30.0
            frame_rate = 0.0
            interpolation = "none"
            max_catch_up_steps = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.update_rate, 30.0);
        assert_eq!(cfg.frame_rate, 0.0);
        assert_eq!(cfg.interpolation, InterpolationMethod::None);
        assert_eq!(cfg.max_catch_up_steps, 3);
        assert_eq!(cfg.max_frame_delta_sec, 0.25);
    }

    #[test]
    fn unknown_interpolation_is_a_parse_error() {
        let err = LoopConfig::from_toml_str(r#"interpolation = "cubic""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "{err}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LoopConfig::load_toml("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"), "{err}");
    }
}
