use serde::{Deserialize, Serialize};

use crate::preload::TriggerMode;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub preload: PreloadConfig,
    #[serde(default)]
    pub loader: LoaderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Preload behaviour for bound anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreloadConfig {
    /// When false, bindings only intercept clicks (default: true).
    #[serde(default = "default_preload_enabled")]
    pub enabled: bool,
    /// Trigger used when a binding doesn't name one (default: hover).
    #[serde(default)]
    pub default_trigger: TriggerMode,
}

/// Settings for the HTTP page loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// `Accept` header sent with every page load (default: application/json).
    #[serde(default = "default_accept")]
    pub accept: String,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: info).
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_preload_enabled() -> bool {
    true
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_accept() -> String {
    "application/json".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            enabled: default_preload_enabled(),
            default_trigger: TriggerMode::default(),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            accept: default_accept(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
