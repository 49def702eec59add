//! Debug logging for singularity.
//!
//! Routes every `log::info!()` etc. to a log file in the system temp dir
//! (`/tmp/singularity_debug.log` on Unix, `%TEMP%\singularity_debug.log` on
//! Windows) so output never lands in the game window's console.
//! When `RUST_LOG` is set, lines are mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level` (applied later via [`apply_config_level`]).

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("singularity_debug.log")
}

struct LogBridge {
    /// Opened on the first record so disabled logging never creates the file.
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

impl LogBridge {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock();
        if file.is_none() {
            // Silently fail if the log file can't be opened
            *file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok();
        }
        if let Some(f) = file.as_mut() {
            let _ = f.write_all(line.as_bytes());
            let _ = f.flush();
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        self.write_line(&line);
        if self.mirror_stderr {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(f) = self.file.lock().as_mut() {
            let _ = f.flush();
        }
    }
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Set when the CLI or `RUST_LOG` chose the level; config must not override it.
static LEVEL_PINNED: AtomicBool = AtomicBool::new(false);

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Level requested through `RUST_LOG`, if any.
///
/// Filter directives that are not a plain level name fall back to `Info`.
fn env_level() -> Option<LevelFilter> {
    let value = std::env::var("RUST_LOG").ok()?;
    Some(LevelFilter::from_str(value.trim()).unwrap_or(LevelFilter::Info))
}

/// Install the log bridge. Safe to call more than once; later calls only
/// adjust the level.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let env = env_level();
    let bridge = BRIDGE.get_or_init(|| LogBridge {
        file: Mutex::new(None),
        mirror_stderr: env.is_some(),
    });
    // Another logger may already be installed (e.g. by a test harness).
    let _ = log::set_logger(bridge);

    match cli_level.or(env) {
        Some(level) => {
            LEVEL_PINNED.store(true, Ordering::Relaxed);
            log::set_max_level(level);
        }
        None => log::set_max_level(LevelFilter::Off),
    }
}

/// Apply the config file's level unless the CLI or `RUST_LOG` already chose one.
///
/// Returns whether the level was applied.
pub fn apply_config_level(level: LevelFilter) -> bool {
    if LEVEL_PINNED.load(Ordering::Relaxed) {
        return false;
    }
    log::set_max_level(level);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        let (secs, micros) = ts.split_once('.').expect("seconds.micros");
        assert!(secs.parse::<u64>().is_ok());
        assert_eq!(micros.len(), 6);
    }

    #[test]
    fn test_log_path_in_temp_dir() {
        let path = log_path();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
        assert_eq!(path.file_name().unwrap(), "singularity_debug.log");
    }
}
