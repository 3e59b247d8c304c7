//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::services::TimerStore;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "A local interval timer server with audio cues")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// JSON file holding the timers (defaults to the user data directory)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Never play cue tones, whatever the timer settings say
    #[arg(long)]
    pub mute: bool,

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

    /// Timer store location, falling back to the default data directory
    pub fn data_file(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(TimerStore::default_path)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally() {
        let config = Config::try_parse_from(["interval-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.mute);
        assert!(config.data_file().ends_with("timers.json"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "interval-timer",
            "-p",
            "8080",
            "--host",
            "0.0.0.0",
            "--data-file",
            "/tmp/t.json",
            "--mute",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.data_file(), PathBuf::from("/tmp/t.json"));
        assert!(config.mute);
        assert_eq!(config.log_level(), "debug");
    }
}
