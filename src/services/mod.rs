//! External command execution module
//!
//! This module runs the user's hooks outside the process.

pub mod notify;

// Re-export main functions
pub use notify::run_phase_command;
