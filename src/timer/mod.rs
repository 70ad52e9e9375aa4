//! Focus timer core
//!
//! A small state machine alternating Focus and Break phases, plus the
//! configuration it is built from.

pub mod configuration;
pub mod engine;
pub mod phase;

// Re-export main types
pub use configuration::TimerConfiguration;
pub use engine::{FocusTimerEngine, PhaseChange, TickOutcome, TimerSnapshot};
pub use phase::Phase;
