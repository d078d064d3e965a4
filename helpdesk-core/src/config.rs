//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/helpdesk/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/helpdesk/` (~/.config/helpdesk/)
//! - State/Logs: `$XDG_STATE_HOME/helpdesk/` (~/.local/state/helpdesk/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Chat timing configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timing for the simulated assistant.
///
/// Both delays come from the original product behavior: the assistant
/// "types" for a moment before replying, and an escalation ticket
/// appears shortly after the escalation reply.
#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Simulated typing delay before the assistant reply, in milliseconds
    #[serde(default = "default_response_delay_ms")]
    pub response_delay_ms: u64,

    /// Delay between the escalation reply and ticket creation, in milliseconds
    #[serde(default = "default_escalation_delay_ms")]
    pub escalation_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            response_delay_ms: default_response_delay_ms(),
            escalation_delay_ms: default_escalation_delay_ms(),
        }
    }
}

fn default_response_delay_ms() -> u64 {
    1500
}

fn default_escalation_delay_ms() -> u64 {
    1000
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/helpdesk/config.toml` (~/.config/helpdesk/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("helpdesk").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/helpdesk/` (~/.local/state/helpdesk/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("helpdesk")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/helpdesk/helpdesk.log` (~/.local/state/helpdesk/helpdesk.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("helpdesk.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chat.response_delay_ms, 1500);
        assert_eq!(config.chat.escalation_delay_ms, 1000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[chat]
response_delay_ms = 200
escalation_delay_ms = 50

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.chat.response_delay_ms, 200);
        assert_eq!(config.chat.escalation_delay_ms, 50);
        assert_eq!(config.logging.level, "debug");
        // Unset fields keep their defaults
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[chat]\nresponse_delay_ms = 10").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.chat.response_delay_ms, 10);
        assert_eq!(config.chat.escalation_delay_ms, 1000);
    }

    #[test]
    fn test_load_from_bad_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
