//! State management module
//!
//! This module owns the timer engine and the channels observers use to
//! follow it.

pub mod app_state;

// Re-export main types
pub use app_state::AppState;
