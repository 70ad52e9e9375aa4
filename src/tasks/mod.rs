//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod phase_notifier;
pub mod tick_source;

// Re-export main functions
pub use phase_notifier::phase_notifier_task;
pub use tick_source::tick_source_task;
