//! Host event loop.
//!
//! `App` owns the font list, the timer registry and the receiving end of the
//! event queue. It installs the configured timers, drains events until the
//! run deadline and realizes the status-line font for every event it handles.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use singularity_config::{CacheModeSetting, Config};
use singularity_fonts::{FontCacheMode, FontList, FontLoader, SwashLoader};
use singularity_timer::TimerRegistry;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Turn the configured policy into a concrete font cache mode.
pub fn resolve_cache_mode<L: FontLoader + ?Sized>(
    setting: CacheModeSetting,
    loader: &L,
) -> FontCacheMode {
    match setting {
        CacheModeSetting::Auto => singularity_fonts::init(loader),
        CacheModeSetting::Buffered => FontCacheMode::Buffered,
        CacheModeSetting::Direct => FontCacheMode::Direct,
    }
}

/// Outcome of one event loop run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Events handled, per event type.
    pub events: BTreeMap<String, usize>,
    /// Events whose font could not be realized.
    pub font_errors: usize,
}

impl RunSummary {
    pub fn total_events(&self) -> usize {
        self.events.values().sum()
    }
}

pub struct App {
    config: Config,
    runtime: Arc<Runtime>,
    fonts: FontList<SwashLoader>,
    timers: TimerRegistry<String>,
    events: mpsc::UnboundedReceiver<String>,
}

impl App {
    /// Build the app from a validated config.
    ///
    /// In buffered mode the font file is read here; a missing file fails now
    /// rather than on the first event.
    pub fn new(runtime: Arc<Runtime>, config: Config) -> Result<Self> {
        let loader = SwashLoader::new();
        let mode = resolve_cache_mode(config.font.cache_mode, &loader);
        let fonts = FontList::new(&config.font.path, config.font.max_size, mode, loader)
            .with_context(|| format!("Failed to open font {:?}", config.font.path))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let timers = TimerRegistry::new(runtime.handle().clone(), tx);

        Ok(App {
            config,
            runtime,
            fonts,
            timers,
            events: rx,
        })
    }

    pub fn timers(&self) -> &TimerRegistry<String> {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerRegistry<String> {
        &mut self.timers
    }

    pub fn fonts(&self) -> &FontList<SwashLoader> {
        &self.fonts
    }

    /// Install every configured timer.
    pub fn install_timers(&mut self) {
        for timer in &self.config.timers {
            self.timers.set_timer(timer.event.clone(), timer.interval_ms);
        }
        log::info!("{} timer(s) active", self.timers.len());
    }

    /// Run the event loop for `run_for`, then cancel all timers.
    pub fn run(&mut self, run_for: Duration) -> RunSummary {
        self.install_timers();

        let runtime = Arc::clone(&self.runtime);
        let summary = runtime.block_on(async {
            let mut summary = RunSummary::default();
            let deadline = tokio::time::sleep(run_for);
            tokio::pin!(deadline);

            loop {
                tokio::select! {
                    _ = &mut deadline => break,
                    event = self.events.recv() => match event {
                        Some(event) => self.handle_event(event, &mut summary),
                        None => break,
                    },
                }
            }
            summary
        });

        self.timers.cancel_all_timers();
        log::info!(
            "Event loop finished: {} event(s), {} font error(s)",
            summary.total_events(),
            summary.font_errors
        );
        summary
    }

    fn handle_event(&mut self, event: String, summary: &mut RunSummary) {
        let size = i32::try_from(self.config.font.render_size).unwrap_or(i32::MAX);
        match self.fonts.get(size) {
            Ok(font) => log::debug!(
                "Event '{}' (font size {}, line height {:.1}px)",
                event,
                font.point_size,
                font.line_height()
            ),
            Err(e) => {
                log::warn!("Event '{}': font unavailable: {}", event, e);
                summary.font_errors += 1;
            }
        }
        *summary.events.entry(event).or_default() += 1;
    }
}
