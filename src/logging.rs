// Logging setup and conditional logging macros.
// The macros are only active in debug builds; the TUI owns the terminal, so
// records go to a file instead of stderr.

use chrono::Local;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "wordle-tui";
const LOG_FILE_NAME: &str = "wordle-tui.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Location of the log file, under the platform cache directory.
#[must_use]
pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(LOG_DIR_NAME).join(LOG_FILE_NAME))
}

/// Initialise `env_logger` writing to `path`.
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this twice is
/// harmless; the second logger is discarded.
pub fn init_logging(path: &Path, default_level: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
    Ok(())
}
