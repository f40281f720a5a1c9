//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_SERVICE_NAME: &str = "foodblock";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Filter directive (`info`, `fb_05_provenance_graph=debug`, ...)
    pub log_level: String,

    /// Whether to write logs to stdout at all
    pub console_output: bool,

    /// JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

/// `false`/`0` are false, anything else true.
fn flag_enabled(value: &str) -> bool {
    let value = value.trim();
    !(value.eq_ignore_ascii_case("false") || value == "0")
}

/// `true`/`1` are true, anything else false.
fn flag_set(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FB_SERVICE_NAME`: Service name (default: foodblock)
    /// - `FB_LOG_LEVEL` or `RUST_LOG`: Filter directive (default: info)
    /// - `FB_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `FB_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("FB_SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("FB_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),

            console_output: lookup("FB_CONSOLE_OUTPUT")
                .map(|v| flag_enabled(&v))
                .unwrap_or(true),

            json_logs: lookup("FB_JSON_LOGS")
                .map(|v| flag_set(&v))
                .unwrap_or(is_container),
        }
    }
}
