//! Startup configuration, loaded from TOML. Every field has a default, so an
//! empty file (or [Config::default]) gives the reference behavior.
use serde::Deserialize;
use std::path::Path;

use crate::detector::autocorrelation::Conditioning;
use crate::detector::internals::AutocorrelationMethod;
use crate::error::ConfigError;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectorConfig {
    /// Frame length in samples.
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_true")]
    pub pre_normalize: bool,
    #[serde(default = "default_true")]
    pub post_normalize: bool,
    #[serde(default)]
    pub center_clip: bool,
    #[serde(default)]
    pub method: AutocorrelationMethod,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackerConfig {
    /// Amplitude level a frame must exceed for its note to be recorded.
    #[serde(default = "default_level_threshold")]
    pub level_threshold: f64,
    #[serde(default = "default_frame_budget_ms")]
    pub frame_budget_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Columns reserved for note labels; the trace covers the rest.
    #[serde(default = "default_left_margin")]
    pub left_margin: usize,
    #[serde(default = "default_note_count")]
    pub note_count: usize,
}

impl DetectorConfig {
    pub fn conditioning(&self) -> Conditioning {
        Conditioning {
            pre_normalize: self.pre_normalize,
            center_clip: self.center_clip,
            post_normalize: self.post_normalize,
        }
    }
}

impl DisplayConfig {
    /// Number of trace columns.
    pub fn trace_len(&self) -> usize {
        self.width.saturating_sub(self.left_margin)
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            pre_normalize: true,
            post_normalize: true,
            center_clip: false,
            method: AutocorrelationMethod::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            level_threshold: default_level_threshold(),
            frame_budget_ms: default_frame_budget_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            left_margin: default_left_margin(),
            note_count: default_note_count(),
        }
    }
}

fn default_size() -> usize {
    1024
}

fn default_true() -> bool {
    true
}

fn default_level_threshold() -> f64 {
    0.02
}

fn default_frame_budget_ms() -> f64 {
    16.0
}

fn default_width() -> usize {
    1280
}

fn default_height() -> usize {
    720
}

fn default_left_margin() -> usize {
    40
}

fn default_note_count() -> usize {
    127
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.detector.size;
        if size < 4 || !size.is_power_of_two() {
            return Err(invalid(format!(
                "detector.size must be a power of two >= 4, got {}",
                size
            )));
        }
        let threshold = self.tracker.level_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(invalid(format!(
                "tracker.level_threshold must be finite and >= 0, got {}",
                threshold
            )));
        }
        let budget = self.tracker.frame_budget_ms;
        if !budget.is_finite() || budget < 0.0 {
            return Err(invalid(format!(
                "tracker.frame_budget_ms must be finite and >= 0, got {}",
                budget
            )));
        }
        let display = &self.display;
        if display.width <= display.left_margin {
            return Err(invalid(format!(
                "display.width ({}) must exceed display.left_margin ({})",
                display.width, display.left_margin
            )));
        }
        if display.height == 0 || display.note_count == 0 {
            return Err(invalid(
                "display.height and display.note_count must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config = Config::from_toml_str(&content)?;
    log::info!("loaded configuration from {}", path.display());
    Ok(config)
}
