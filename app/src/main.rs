mod config;
mod logging;
mod renderer;
mod scene;

use std::{thread, time::Duration};

use anyhow::Result;
use log::{info, warn};
use loop_core::{Clock, ExitSignal, MonotonicClock, Scheduler};

use crate::{
    config::AppConfig,
    logging::ConsoleLoggerConfig,
    renderer::LogRenderer,
    scene::{FpsScene, SceneState},
};

fn main() -> Result<()> {
    logging::init(&ConsoleLoggerConfig::from_env())?;

    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            AppConfig::load_toml(path)?
        }
        None => AppConfig::default(),
    };

    info!(
        "update_rate={} frame_rate={} interpolation={} max_catch_up_steps={}",
        cfg.frame_loop.update_rate,
        cfg.frame_loop.frame_rate,
        cfg.frame_loop.interpolation.as_str(),
        cfg.frame_loop.max_catch_up_steps
    );

    let exit = ExitSignal::new();
    if let Err(e) = exit.install_ctrlc_handler() {
        warn!("Ctrl-C handler not installed: {e}");
    }

    let scene = FpsScene::new(cfg.app.time_scale, LogRenderer::new(cfg.app.log_every_frames));
    let mut scheduler = Scheduler::new(cfg.frame_loop.clone(), scene, SceneState::default());

    let clock = MonotonicClock::new();
    let pacing = Duration::from_millis(cfg.app.sleep_ms);

    info!("first frame");
    while !exit.is_exit_requested() {
        scheduler.tick_clock(&clock);

        if cfg.app.run_seconds > 0.0 && clock.now_sec() >= cfg.app.run_seconds {
            break;
        }
        if !pacing.is_zero() {
            thread::sleep(pacing);
        }
    }

    let m = scheduler.metrics();
    let t = scheduler.time();
    info!(
        "shutdown: updates={} frames={} dropped={} ups={:.1} fps={:.1} scene_time={:.2}s",
        m.total_updates,
        m.total_frames,
        m.dropped_steps,
        m.ups,
        m.fps,
        scheduler.current().time
    );
    info!(
        "renderer saw {} frames / {} submissions over {:.2}s",
        scheduler.simulation().renderer().frames(),
        scheduler.simulation().renderer().submissions(),
        t.t_sec
    );

    Ok(())
}
