//! Command-line interface for singularity.
//!
//! Flags override values from the config file.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use singularity_config::{CacheModeSetting, Config, LogLevel, TimerConfig};

/// singularity - engine core for Endgame: Singularity
#[derive(Parser, Debug)]
#[command(name = "singularity")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to load instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font file to load
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Number of point sizes the font cache can hold
    #[arg(long, value_name = "N")]
    pub max_size: Option<usize>,

    /// Font source policy: auto, buffered or direct
    #[arg(long, value_name = "MODE", value_parser = parse_cache_mode)]
    pub cache_mode: Option<CacheModeSetting>,

    /// Periodic event timer, repeatable (e.g. --timer redraw=250)
    #[arg(long = "timer", value_name = "NAME=MS", value_parser = parse_timer)]
    pub timers: Vec<TimerConfig>,

    /// Stop the event loop after this many seconds
    #[arg(long, value_name = "SECONDS", default_value_t = 5.0)]
    pub run_for: f64,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,
}

fn parse_cache_mode(value: &str) -> Result<CacheModeSetting, String> {
    CacheModeSetting::from_name(value)
        .ok_or_else(|| format!("unknown cache mode '{value}' (expected auto, buffered or direct)"))
}

fn parse_timer(value: &str) -> Result<TimerConfig, String> {
    TimerConfig::parse_pair(value).map_err(|e| e.to_string())
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::from_name(value).ok_or_else(|| format!("unknown log level '{value}'"))
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub max_size: Option<usize>,
    pub cache_mode: Option<CacheModeSetting>,
    pub timers: Vec<TimerConfig>,
    pub run_for: Duration,
    pub log_level: Option<LogLevel>,
}

impl RuntimeOptions {
    /// Overlay CLI values onto a loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(font) = &self.font {
            config = config.with_font_path(font.clone());
        }
        if let Some(max_size) = self.max_size {
            config = config.with_max_size(max_size);
        }
        if let Some(mode) = self.cache_mode {
            config = config.with_cache_mode(mode);
        }
        for timer in &self.timers {
            config = config.with_timer(timer.event.clone(), timer.interval_ms);
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        config
    }
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        RuntimeOptions {
            config_path: cli.config,
            font: cli.font,
            max_size: cli.max_size,
            cache_mode: cli.cache_mode,
            timers: cli.timers,
            run_for: Duration::try_from_secs_f64(cli.run_for.max(0.0)).unwrap_or(Duration::MAX),
            log_level: cli.log_level,
        }
    }
}

/// Parse process arguments.
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}
