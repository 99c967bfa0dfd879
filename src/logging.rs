use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::app_dirs::AppDirs;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "KANATYPE_LOG";
const DEFAULT_FILTER: &str = "kanatype=info";

/// Split `--log-file` into directory and file name; bare names land in the app log dir.
pub fn log_target(requested: &Path) -> (PathBuf, PathBuf) {
    let file_name = requested
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("kanatype.log"));
    let dir = match requested.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => AppDirs::log_dir(),
    };
    (dir, file_name)
}

/// Route `tracing` output to `log_file`. The terminal belongs to the TUI, so nothing is
/// ever written to stdout or stderr. Keep the guard alive until exit to flush the writer.
pub fn init(log_file: &Path) -> std::io::Result<WorkerGuard> {
    let (dir, file_name) = log_target(log_file);
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init();

    Ok(guard)
}
