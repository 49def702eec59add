//! Configuration structs and validation.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{CacheModeSetting, LogLevel};

fn default_font_path() -> PathBuf {
    PathBuf::from("data/fonts/DejaVuSans.ttf")
}

fn default_max_size() -> usize {
    100
}

fn default_render_size() -> u32 {
    12
}

/// Font cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font file to load
    #[serde(default = "default_font_path")]
    pub path: PathBuf,

    /// Number of point sizes the font list can hold (sizes `0..max_size`)
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Font source policy
    #[serde(default)]
    pub cache_mode: CacheModeSetting,

    /// Point size used for the event status line
    #[serde(default = "default_render_size")]
    pub render_size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: default_font_path(),
            max_size: default_max_size(),
            cache_mode: CacheModeSetting::default(),
            render_size: default_render_size(),
        }
    }
}

/// A periodic event timer installed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Event type name posted by the timer
    pub event: String,
    /// Interval between posts; zero or negative disables the timer
    pub interval_ms: i64,
}

impl TimerConfig {
    /// Parse a `NAME=MS` pair as given on the command line.
    pub fn parse_pair(pair: &str) -> Result<Self, ConfigError> {
        let (event, interval) = pair.split_once('=').ok_or_else(|| {
            ConfigError::Validation(format!("timer '{pair}' must be written as NAME=MS"))
        })?;
        let interval_ms = interval.trim().parse::<i64>().map_err(|e| {
            ConfigError::Validation(format!("timer '{pair}' has invalid interval: {e}"))
        })?;
        Ok(TimerConfig {
            event: event.trim().to_string(),
            interval_ms,
        })
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub font: FontConfig,

    #[serde(default)]
    pub timers: Vec<TimerConfig>,

    #[serde(default)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font.path = path.into();
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.font.max_size = max_size;
        self
    }

    pub fn with_cache_mode(mut self, cache_mode: CacheModeSetting) -> Self {
        self.font.cache_mode = cache_mode;
        self
    }

    pub fn with_render_size(mut self, render_size: u32) -> Self {
        self.font.render_size = render_size;
        self
    }

    /// Add a timer, replacing any existing timer for the same event.
    pub fn with_timer(mut self, event: impl Into<String>, interval_ms: i64) -> Self {
        let event = event.into();
        self.timers.retain(|t| t.event != event);
        self.timers.push(TimerConfig { event, interval_ms });
        self
    }

    /// Check field values that serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("font.path must not be empty".into()));
        }
        if self.font.max_size == 0 {
            return Err(ConfigError::Validation(
                "font.max_size must be at least 1".into(),
            ));
        }
        if self.font.max_size > i32::MAX as usize {
            return Err(ConfigError::Validation(format!(
                "font.max_size must not exceed {}",
                i32::MAX
            )));
        }
        if self.font.render_size as usize >= self.font.max_size {
            return Err(ConfigError::Validation(format!(
                "font.render_size {} must be below font.max_size {}",
                self.font.render_size, self.font.max_size
            )));
        }

        let mut seen = HashSet::new();
        for timer in &self.timers {
            if timer.event.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "timer event names must not be empty".into(),
                ));
            }
            if !seen.insert(timer.event.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate timer for event '{}'",
                    timer.event
                )));
            }
        }
        Ok(())
    }
}
