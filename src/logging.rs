use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "day_planner=info";
const LOG_FILE: &str = "planner.log";

/// Log directory under the platform data dir, e.g.
/// `~/.local/share/day-planner` on Linux.
pub fn log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("day-planner"))
}

/// Send `tracing` output to a file so it does not draw over the terminal UI.
///
/// `PLANNER_LOG` takes precedence over the configured filter. Returns `None`
/// when no data directory is available; logging is then disabled. Keep the
/// guard alive for the life of the program so buffered lines are flushed.
pub fn init(config_filter: Option<&str>) -> Option<WorkerGuard> {
    let dir = log_dir()?;
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("Could not create log directory {}: {e}", dir.display());
        return None;
    }

    let filter = EnvFilter::try_from_env("PLANNER_LOG").unwrap_or_else(|_| {
        EnvFilter::try_new(config_filter.unwrap_or(DEFAULT_FILTER))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    });

    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
