//! Timer configuration and the optional persisted configuration file

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Lower bound for the baseline focus duration, in minutes
pub const MIN_FOCUS_MINUTES: u32 = 25;
/// Upper bound for the baseline focus duration, in minutes
pub const MAX_FOCUS_MINUTES: u32 = 60;
/// Shortest break ever handed out, in minutes
pub const MIN_BREAK_MINUTES: u32 = 5;

/// Baseline durations the engine is built from.
///
/// `focus_minutes` is always inside `[MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES]`;
/// every constructor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfiguration {
    focus_minutes: u32,
}

/// On-disk shape: any integer is accepted and clamped afterwards
#[derive(Debug, Default, Deserialize)]
struct PersistedConfiguration {
    focus_minutes: Option<i64>,
}

impl TimerConfiguration {
    /// Build a configuration, clamping `focus_minutes` into range
    pub fn new(focus_minutes: i64) -> Self {
        let clamped = focus_minutes.clamp(MIN_FOCUS_MINUTES as i64, MAX_FOCUS_MINUTES as i64);
        if clamped != focus_minutes {
            warn!(
                "Focus duration {} outside [{}, {}], clamped to {}",
                focus_minutes, MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES, clamped
            );
        }
        Self {
            focus_minutes: clamped as u32,
        }
    }

    /// Load a persisted configuration from a JSON file such as `{"focus_minutes": 40}`
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let persisted: PersistedConfiguration =
            serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded timer configuration from {}", path.display());
        Ok(persisted
            .focus_minutes
            .map(Self::new)
            .unwrap_or_default())
    }

    /// Baseline focus duration in minutes
    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    /// Break duration that follows a focus period of this length
    pub fn break_minutes(&self) -> u32 {
        break_minutes_for(self.focus_minutes)
    }
}

impl Default for TimerConfiguration {
    fn default() -> Self {
        Self {
            focus_minutes: MIN_FOCUS_MINUTES,
        }
    }
}

/// Break scales with focus length but never drops below `MIN_BREAK_MINUTES`
pub fn break_minutes_for(focus_minutes: u32) -> u32 {
    focus_minutes.saturating_sub(20).max(MIN_BREAK_MINUTES)
}
