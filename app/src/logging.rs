use std::{io::Write, sync::OnceLock, time::Instant};

use env_logger::Builder;
use log::LevelFilter;

static BOOT: OnceLock<Instant> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct ConsoleLoggerConfig {
    pub level: LevelFilter,
    pub colors: bool,
}

impl ConsoleLoggerConfig {
    pub fn from_env() -> Self {
        let level = std::env::var("FPS_DEMO_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info);
        let colors = std::env::var("FPS_DEMO_LOG_COLORS")
            .ok()
            .map(|v| v != "0")
            .unwrap_or(true);

        Self { level, colors }
    }
}

impl Default for ConsoleLoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Installs the process-wide console logger.
///
/// Line format: `[+mm:ss.mmm] [LEVEL] target message`.
pub fn init(config: &ConsoleLoggerConfig) -> anyhow::Result<()> {
    BOOT.get_or_init(Instant::now);

    let mut builder = Builder::new();
    builder.filter_level(config.level);
    builder.write_style(if config.colors {
        env_logger::WriteStyle::Auto
    } else {
        env_logger::WriteStyle::Never
    });

    builder.format(|buf, record| {
        let style = buf.default_level_style(record.level());
        let uptime = BOOT.get().map(|b| b.elapsed().as_millis() as u64).unwrap_or(0);
        writeln!(
            buf,
            "[{}] [{style}{:<5}{style:#}] {:<20} {}",
            fmt_uptime(uptime),
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder.try_init()?;
    Ok(())
}

/// `+mm:ss.mmm`, or `+hh:mm:ss.mmm` past the first hour.
fn fmt_uptime(total_ms: u64) -> String {
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;
    let s = total_s % 60;
    let total_m = total_s / 60;
    let m = total_m % 60;
    let h = total_m / 60;

    if h > 0 {
        format!("+{h:02}:{m:02}:{s:02}.{ms:03}")
    } else {
        format!("+{m:02}:{s:02}.{ms:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_uptime;

    #[test]
    fn uptime_formats() {
        assert_eq!(fmt_uptime(0), "+00:00.000");
        assert_eq!(fmt_uptime(61_005), "+01:01.005");
        assert_eq!(fmt_uptime(3_600_000 + 2_500), "+01:00:02.500");
    }
}
