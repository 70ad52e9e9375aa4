//! Error types for focus-timer

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("phase change command failed: {0}")]
    Notify(String),
}

pub type Result<T> = std::result::Result<T, Error>;
