//! Focus Timer - a Focus/Break countdown engine behind an HTTP control server
//!
//! The core is [`timer::FocusTimerEngine`], a clock-agnostic state machine.
//! The rest of the crate hosts it: a tick source that owns the wall clock,
//! a notifier for phase changes, and an HTTP API for commands and status.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
pub use timer::{FocusTimerEngine, Phase, TimerConfiguration, TimerSnapshot};
pub use utils::signals::shutdown_signal;
