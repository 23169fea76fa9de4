//! Configuration module for the echo client.
//!
//! Supports both command-line arguments and a TOML configuration file.
//! CLI arguments take precedence over config file values. The peer
//! address is compiled in and cannot be configured.

use crate::connection::Timeouts;
use crate::error::ConfigError;
use clap::Parser;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the echo client
#[derive(Parser, Debug)]
#[command(name = "echo-client")]
#[command(author = "echo-client authors")]
#[command(version = "0.1.0")]
#[command(about = "Send one buffer to the echo peer and print its reply", long_about = None)]
pub struct CliArgs {
    /// Bytes to send, taken verbatim
    pub payload: OsString,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Connect timeout in seconds (0 = wait as long as the OS allows)
    #[arg(long)]
    pub connect_timeout: Option<u64>,

    /// Read timeout in seconds (0 = no timeout)
    #[arg(long)]
    pub read_timeout: Option<u64>,

    /// Write timeout in seconds (0 = no timeout)
    #[arg(long)]
    pub write_timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Client-related configuration, all timeouts in seconds
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
    #[serde(default = "default_io_timeout")]
    pub read_timeout: u64,
    #[serde(default = "default_io_timeout")]
    pub write_timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            read_timeout: default_io_timeout(),
            write_timeout: default_io_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_io_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub payload: Vec<u8>,
    pub timeouts: Timeouts,
    pub log_level: String,
}

impl Config {
    /// Load configuration from the process arguments and optional TOML file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(CliArgs::parse())
    }

    /// Merge parsed CLI args with the TOML file they point at, if any.
    pub fn from_args(cli: CliArgs) -> Result<Self, ConfigError> {
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents =
                std::fs::read_to_string(config_path).map_err(|source| ConfigError::FileRead {
                    path: config_path.clone(),
                    source,
                })?;
            toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
                path: config_path.clone(),
                source,
            })?
        } else {
            TomlConfig::default()
        };

        let client = toml_config.client;
        let timeouts = Timeouts {
            connect: seconds(cli.connect_timeout.unwrap_or(client.connect_timeout)),
            read: seconds(cli.read_timeout.unwrap_or(client.read_timeout)),
            write: seconds(cli.write_timeout.unwrap_or(client.write_timeout)),
        };

        Ok(Config {
            payload: payload_bytes(cli.payload),
            timeouts,
            log_level: cli.log_level.unwrap_or(toml_config.logging.level),
        })
    }
}

/// Zero disables the timeout.
fn seconds(secs: u64) -> Option<Duration> {
    (secs > 0).then_some(Duration::from_secs(secs))
}

#[cfg(unix)]
fn payload_bytes(arg: OsString) -> Vec<u8> {
    use std::os::unix::ffi::OsStringExt;
    arg.into_vec()
}

#[cfg(not(unix))]
fn payload_bytes(arg: OsString) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}
