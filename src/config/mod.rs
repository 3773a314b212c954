//! Configuration Module
//!
//! TOML configuration for the `tcpopt` binary:
//! - Logging level
//! - Probe target and the socket options applied to it
//! - Environment variable overrides (TCPOPT__* prefix)

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use config::{Environment, File, FileFormat};
use serde::Deserialize;

use crate::ops::BufferOptions;

#[cfg(test)]
mod tests;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    Io(std::io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// Config crate error
    Config(config::ConfigError),
    /// Validation error
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Config(e) => write!(f, "Config error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Config(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(e: config::ConfigError) -> Self {
        ConfigError::Config(e)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub log: LogConfig,
    /// Probe configuration
    pub probe: ProbeConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Target and socket options for the `probe` command
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Address to connect to when none is given on the command line
    pub target: Option<SocketAddr>,
    /// Upper bound on connection establishment
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Delay between applying options and sampling counters
    #[serde(with = "humantime_serde")]
    pub settle: Duration,
    /// Unsent-data low-water mark in bytes
    pub unsent_threshold: Option<u32>,
    /// Keep-alive idle time
    #[serde(with = "humantime_serde")]
    pub keepalive_idle: Option<Duration>,
    /// Keep-alive probe interval
    #[serde(with = "humantime_serde")]
    pub keepalive_interval: Option<Duration>,
    /// Keep-alive probe count
    pub keepalive_probes: Option<u32>,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_settle() -> Duration {
    Duration::from_millis(100)
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: None,
            connect_timeout: default_connect_timeout(),
            settle: default_settle(),
            unsent_threshold: None,
            keepalive_idle: None,
            keepalive_interval: None,
            keepalive_probes: None,
        }
    }
}

impl ProbeConfig {
    /// Buffer options to apply, if a threshold is configured
    pub fn buffer_options(&self) -> Option<BufferOptions> {
        self.unsent_threshold
            .map(|unsent_threshold| BufferOptions { unsent_threshold })
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A missing file yields the defaults. `TCPOPT__SECTION__KEY`
    /// environment variables override file values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("log.level", default_log_level())?
            .set_default("probe.connect_timeout", "2s")?
            .set_default("probe.settle", "100ms")?;

        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                builder = builder.add_source(File::from_str(&content, FileFormat::Toml));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(ConfigError::Io(e)),
        }

        // Double underscore separates nested keys, single underscore preserved in field names
        let cfg = builder
            .add_source(
                Environment::with_prefix("TCPOPT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = cfg.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string, without environment overrides
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.log.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.log.level
            )));
        }

        let probe = &self.probe;
        if probe.connect_timeout.is_zero() {
            return Err(ConfigError::Validation(
                "probe.connect_timeout must be greater than zero".to_string(),
            ));
        }

        if let Some(threshold) = probe.unsent_threshold {
            if i32::try_from(threshold).is_err() {
                return Err(ConfigError::Validation(format!(
                    "probe.unsent_threshold {} exceeds {}",
                    threshold,
                    i32::MAX
                )));
            }
        }

        for (key, value) in [
            ("probe.keepalive_idle", probe.keepalive_idle),
            ("probe.keepalive_interval", probe.keepalive_interval),
        ] {
            if let Some(d) = value {
                if d.is_zero() || d.as_secs() >= i32::MAX as u64 {
                    return Err(ConfigError::Validation(format!(
                        "{} must be between 1s and {}s",
                        key,
                        i32::MAX
                    )));
                }
            }
        }

        if let Some(probes) = probe.keepalive_probes {
            if probes == 0 || i32::try_from(probes).is_err() {
                return Err(ConfigError::Validation(format!(
                    "probe.keepalive_probes must be between 1 and {}",
                    i32::MAX
                )));
            }
        }

        Ok(())
    }
}
