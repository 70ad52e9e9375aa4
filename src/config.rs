//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{error::Result, timer::TimerConfiguration};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "focus-timer")]
#[command(about = "A focus/break countdown timer controlled over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial focus duration in minutes (clamped to 25..=60)
    #[arg(short, long, allow_negative_numbers = true)]
    pub focus: Option<i64>,

    /// JSON file holding the persisted timer configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Shell command to run whenever the timer switches phase
    #[arg(long)]
    pub on_phase_change: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolve the initial timer configuration.
    ///
    /// The config file is read first; `--focus` overrides whatever it holds.
    pub fn timer_configuration(&self) -> Result<TimerConfiguration> {
        let from_file = match &self.config {
            Some(path) => TimerConfiguration::load(path)?,
            None => TimerConfiguration::default(),
        };

        Ok(match self.focus {
            Some(minutes) => TimerConfiguration::new(minutes),
            None => from_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["focus-timer"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.timer_configuration().unwrap().focus_minutes(), 25);
    }

    #[test]
    fn test_focus_flag_is_clamped() {
        let config = Config::try_parse_from(["focus-timer", "--focus", "90"]).unwrap();
        assert_eq!(config.timer_configuration().unwrap().focus_minutes(), 60);

        let config = Config::try_parse_from(["focus-timer", "-f", "-3"]).unwrap();
        assert_eq!(config.timer_configuration().unwrap().focus_minutes(), 25);
    }

    #[test]
    fn test_focus_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"focus_minutes": 40}}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::try_parse_from(["focus-timer", "--config", &path]).unwrap();
        assert_eq!(config.timer_configuration().unwrap().focus_minutes(), 40);

        let config =
            Config::try_parse_from(["focus-timer", "--config", &path, "--focus", "30"]).unwrap();
        assert_eq!(config.timer_configuration().unwrap().focus_minutes(), 30);
    }

    #[test]
    fn test_verbose() {
        let config = Config::try_parse_from(["focus-timer", "-v"]).unwrap();
        assert_eq!(config.log_level(), "debug");
    }
}
