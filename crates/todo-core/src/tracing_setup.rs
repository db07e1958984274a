use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// Environment variable naming the debug log file
pub const LOG_FILE_ENV: &str = "TODO_DASH_LOG_FILE";

/// Install file logging if `TODO_DASH_LOG_FILE` is set. The terminal UI owns
/// stdout/stderr, so without a file nothing is installed.
pub fn init_tracing() -> Result<Option<PathBuf>> {
    match std::env::var_os(LOG_FILE_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            init_tracing_to(&path)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

pub fn init_tracing_to(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_logging_writes_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dashboard.log");

        init_tracing_to(&path).unwrap();
        tracing::info!(page = 3, "hello from the test");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello from the test"));
        assert!(contents.contains("page=3"));
    }
}
