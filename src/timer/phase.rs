//! Timer phase

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two alternating countdown phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Working period, sized by the baseline focus duration
    Focus,
    /// Rest period, derived from the baseline when a focus period ends
    Break,
}

impl Phase {
    /// Lowercase name used in logs, JSON and notifier environment
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Focus => "focus",
            Phase::Break => "break",
        }
    }

    /// The phase that follows this one
    pub fn next(&self) -> Phase {
        match self {
            Phase::Focus => Phase::Break,
            Phase::Break => Phase::Focus,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
