//! Fixed-step simulation loop decoupled from rendering.
//!
//! The host calls [`Scheduler::tick`] as often as it likes; the scheduler
//! decides how many fixed updates to run, whether a frame is due, and how far
//! between the last two simulation states that frame should sit.

pub mod config;
pub mod error;
pub mod frame;
pub mod schedule;
pub mod signals;
pub mod simulation;
pub mod telemetry;
pub mod time;

pub use config::{InterpolationMethod, LoopConfig};
pub use error::ConfigError;
pub use frame::FrameReport;
pub use schedule::Scheduler;
pub use signals::ExitSignal;
pub use simulation::{FnSimulation, Simulation};
pub use telemetry::LoopMetrics;
pub use time::{Clock, ManualClock, MonotonicClock, Time};
