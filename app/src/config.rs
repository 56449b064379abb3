use std::{fs, path::Path};

use anyhow::{Context, Result};
use loop_core::LoopConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default, rename = "loop")]
    pub frame_loop: LoopConfig,
    #[serde(default)]
    pub app: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Stop after this many seconds. `0` runs until Ctrl-C.
    #[serde(default = "default_run_seconds")]
    pub run_seconds: f64,
    /// Scene time per simulated second.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
    /// Host-side pacing sleep between ticks.
    #[serde(default = "default_sleep_ms")]
    pub sleep_ms: u64,
    /// Log one teapot matrix every N frames. `0` disables.
    #[serde(default = "default_log_every_frames")]
    pub log_every_frames: u64,
}

fn default_run_seconds() -> f64 { 5.0 }
fn default_time_scale() -> f32 { 1.0 }
fn default_sleep_ms() -> u64 { 1 }
fn default_log_every_frames() -> u64 { 60 }

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            run_seconds: default_run_seconds(),
            time_scale: default_time_scale(),
            sleep_ms: default_sleep_ms(),
            log_every_frames: default_log_every_frames(),
        }
    }
}

impl AppConfig {
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: AppConfig =
            toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loop_core::InterpolationMethod;

    #[test]
    fn sections_are_optional() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.frame_loop, LoopConfig::default());
        assert_eq!(cfg.app.run_seconds, 5.0);
    }

    #[test]
    fn loop_section_maps_to_loop_config() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [loop]
            update_rate = 25.0
            interpolation = "none"

            [app]
            time_scale = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.frame_loop.update_rate, 25.0);
        assert_eq!(cfg.frame_loop.interpolation, InterpolationMethod::None);
        assert_eq!(cfg.app.time_scale, 2.0);
        assert_eq!(cfg.app.sleep_ms, 1);
    }
}
