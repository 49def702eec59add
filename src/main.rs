use std::sync::Arc;

use anyhow::{Context, Result};
use singularity::app::App;
use singularity::cli;
use singularity::config::Config;

fn main() -> Result<()> {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();

    // Route all log::info!() etc. to the debug log file.
    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config.
    singularity::debug::init_log_bridge(options.log_level.map(|l| l.to_level_filter()));

    log::info!("Starting singularity {}", singularity::VERSION);

    let config = match &options.config_path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config {:?}", path))?,
        None => Config::load().context("Failed to load config")?,
    };
    let config = options.apply(config);
    config.validate()?;
    singularity::debug::apply_config_level(config.log_level.to_level_filter());

    // Timer tasks share this thread with the event loop.
    let runtime = Arc::new(
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?,
    );

    let mut app = App::new(Arc::clone(&runtime), config)?;
    let summary = app.run(options.run_for);
    drop(app);

    for (event, count) in &summary.events {
        println!("{event}: {count}");
    }
    if summary.font_errors > 0 {
        eprintln!(
            "singularity: {} event(s) could not realize their font (see {:?})",
            summary.font_errors,
            singularity::debug::log_path()
        );
    }

    // Drop the runtime explicitly so aborted timer tasks are released before
    // main returns.
    log::info!("Event loop exited, shutting down runtime");
    if let Ok(rt) = Arc::try_unwrap(runtime) {
        rt.shutdown_timeout(std::time::Duration::from_secs(2));
    }
    Ok(())
}
