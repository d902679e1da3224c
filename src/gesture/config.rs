use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read gesture config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse gesture config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid gesture config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    /// Every fingertip closer to the wrist than this counts as a fist.
    pub fist_threshold_px: f64,
    /// Thumb–index distance below this scrolls up.
    pub scroll_up_threshold_px: f64,
    /// Thumb–index distance above this scrolls down.
    pub scroll_down_threshold_px: f64,
    pub click_threshold_px: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            fist_threshold_px: 40.0,
            scroll_up_threshold_px: 50.0,
            scroll_down_threshold_px: 150.0,
            click_threshold_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebounceConfig {
    pub cooldown_ms: f64,
    /// MoveCursor is sampled for metrics at this interval instead of the cooldown.
    pub move_sample_interval_ms: f64,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 500.0,
            move_sample_interval_ms: 1_000.0,
        }
    }
}

impl DebounceConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs_f64(self.cooldown_ms / 1_000.0)
    }

    pub fn move_sample_interval(&self) -> Duration {
        Duration::from_secs_f64(self.move_sample_interval_ms / 1_000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitConfig {
    pub hold_ms: f64,
}

impl Default for ExitConfig {
    fn default() -> Self {
        Self { hold_ms: 3_000.0 }
    }
}

impl ExitConfig {
    pub fn hold(&self) -> Duration {
        Duration::from_secs_f64(self.hold_ms / 1_000.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorTestConfig {
    pub smoothness_window: usize,
    /// `smoothness = max(0, 100 - jitter * scale)`
    pub smoothness_scale: f64,
    pub precision_hit_radius_px: f64,
    pub edge_margin_px: f64,
    pub rapid_time_threshold_ms: f64,
    pub rapid_distance_threshold_px: f64,
}

impl Default for CursorTestConfig {
    fn default() -> Self {
        Self {
            smoothness_window: 100,
            smoothness_scale: 2.0,
            precision_hit_radius_px: 30.0,
            edge_margin_px: 50.0,
            rapid_time_threshold_ms: 1_000.0,
            rapid_distance_threshold_px: 200.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureConfig {
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub exit: ExitConfig,
    #[serde(default)]
    pub cursor_test: CursorTestConfig,
}

impl GestureConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), String> {
        let c = &self.classifier;
        require_positive("classifier.fist_threshold_px", c.fist_threshold_px)?;
        require_positive("classifier.click_threshold_px", c.click_threshold_px)?;
        require_positive("classifier.scroll_up_threshold_px", c.scroll_up_threshold_px)?;
        require_positive("classifier.scroll_down_threshold_px", c.scroll_down_threshold_px)?;
        if c.scroll_down_threshold_px < c.scroll_up_threshold_px {
            return Err(
                "classifier.scroll_down_threshold_px must be >= scroll_up_threshold_px"
                    .to_string(),
            );
        }

        require_non_negative("debounce.cooldown_ms", self.debounce.cooldown_ms)?;
        require_non_negative(
            "debounce.move_sample_interval_ms",
            self.debounce.move_sample_interval_ms,
        )?;
        require_positive("exit.hold_ms", self.exit.hold_ms)?;

        let t = &self.cursor_test;
        if t.smoothness_window < 3 {
            return Err("cursor_test.smoothness_window must be >= 3".to_string());
        }
        require_non_negative("cursor_test.smoothness_scale", t.smoothness_scale)?;
        require_positive("cursor_test.precision_hit_radius_px", t.precision_hit_radius_px)?;
        require_non_negative("cursor_test.edge_margin_px", t.edge_margin_px)?;
        require_positive("cursor_test.rapid_time_threshold_ms", t.rapid_time_threshold_ms)?;
        require_non_negative(
            "cursor_test.rapid_distance_threshold_px",
            t.rapid_distance_threshold_px,
        )?;

        Ok(())
    }
}

/// Finite and strictly greater than zero. NaN fails.
pub fn require_positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a finite value > 0, got {value}"))
    }
}

/// Finite and at least zero. NaN fails.
pub fn require_non_negative(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a finite value >= 0, got {value}"))
    }
}
