use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::info;

/// Cooperative stop flag for the host loop.
///
/// `Scheduler` runs everything on the caller's thread and holds no in-flight
/// work between ticks. The host checks this flag between calls to `tick` and
/// stops calling it once the flag is raised. A tick that is already running
/// finishes its updates and render first, so `previous` and `current` are
/// always a consistent pair when the loop exits. The flag may be raised from
/// any thread, including the Ctrl-C handler or a simulation callback.
#[derive(Clone, Default)]
pub struct ExitSignal {
    flag: Arc<AtomicBool>,
}

impl ExitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn request_exit(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_exit_requested(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Raises the flag on Ctrl-C. Only one handler may be installed per process.
    pub fn install_ctrlc_handler(&self) -> anyhow::Result<()> {
        let signal = self.clone();
        ctrlc::set_handler(move || {
            info!("interrupt received, stopping loop");
            signal.request_exit();
        })?;
        Ok(())
    }
}
