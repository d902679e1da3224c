use std::env;

use crate::gesture::config::{require_non_negative, require_positive};
use crate::gesture::types::ScreenSize;
use crate::logging::LogConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub enable_file_logs: bool,
    pub log_dir: String,
    pub report_dir: String,
    pub screen: ScreenSize,
    /// Optional JSON file overriding the default gesture thresholds.
    pub gesture_config_path: Option<String>,
    pub trace_path: String,
    pub session: SessionEnvConfig,
}

#[derive(Debug, Clone)]
pub struct SessionEnvConfig {
    pub write_text_reports: bool,
    pub start_in_cursor_test_mode: bool,
    pub rapid_time_threshold_ms: Option<f64>,
    pub rapid_distance_threshold_px: Option<f64>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            log_level: env_string("RUST_LOG", "info"),
            enable_file_logs: env_flag("ENABLE_FILE_LOGS", false),
            log_dir: env_string("LOG_DIR", "./logs"),
            report_dir: env_string("REPORT_DIR", "./reports"),
            screen: ScreenSize {
                width: env_pixels("SCREEN_WIDTH", 1920),
                height: env_pixels("SCREEN_HEIGHT", 1080),
            },
            gesture_config_path: env_opt("GESTURE_CONFIG_PATH"),
            trace_path: env_string("TRACE_PATH", "./trace.jsonl"),
            session: SessionEnvConfig {
                write_text_reports: env_flag("WRITE_TEXT_REPORTS", true),
                start_in_cursor_test_mode: env_flag("CURSOR_TEST_MODE", false),
                rapid_time_threshold_ms: env_threshold("RAPID_TIME_THRESHOLD_MS", require_positive),
                rapid_distance_threshold_px: env_threshold(
                    "RAPID_DISTANCE_THRESHOLD_PX",
                    require_non_negative,
                ),
            },
        }
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.log_level.clone(),
            enable_file_logs: self.enable_file_logs,
            log_dir: self.log_dir.clone(),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// A screen dimension. Zero or unparsable values keep the default.
fn env_pixels(key: &str, default: u32) -> u32 {
    let Some(raw) = env_opt(key) else {
        return default;
    };
    match raw.trim().parse::<u32>() {
        Ok(v) if v > 0 => v,
        _ => {
            tracing::warn!(key, value = %raw, default, "Invalid screen dimension, using default");
            default
        }
    }
}

/// Optional cursor-test threshold override, checked with the same rule the
/// gesture config applies to it. Invalid values are dropped with a warning.
fn env_threshold(key: &str, check: fn(&str, f64) -> Result<(), String>) -> Option<f64> {
    let raw = env_opt(key)?;
    let parsed = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| e.to_string())
        .and_then(|v| check(key, v).map(|()| v));
    match parsed {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "Ignoring threshold override");
            None
        }
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        Err(_) => default,
    }
}
