//! Tracing setup.
//!
//! Logs go to a daily rolling file under the data directory. The TUI owns the
//! terminal, so only the subcommands also log to stderr.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const RETENTION_DAYS: u64 = 14;
const LOG_FILE_PREFIX: &str = "taskpilot.log";
const DEFAULT_LEVEL: &str = "info";

/// Where and how much to log.
#[derive(Debug, Clone, Copy)]
pub struct LoggingOptions<'a> {
    /// Directory for the rolling log files.
    pub log_dir: &'a Path,
    /// Level from the settings file, used when `RUST_LOG` is unset.
    pub level: Option<&'a str>,
    /// Also log to stderr.
    pub stderr: bool,
}

/// Installs the global subscriber and returns the log directory.
///
/// Calling it twice is harmless: the second subscriber is not installed.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init_logging(options: LoggingOptions<'_>) -> Result<PathBuf> {
    let log_dir = options.log_dir.to_path_buf();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    cleanup_old_logs(&log_dir, RETENTION_DAYS);

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The guard flushes on drop; it must live for the whole process.
    let _ = LOG_GUARD.set(guard);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let stderr_layer = options.stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    let _ = tracing_subscriber::registry()
        .with(filter(options.level))
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    Ok(log_dir)
}

/// `RUST_LOG` wins, then the configured level, then `info`.
fn filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level))
}

fn default_filter(level: Option<&str>) -> EnvFilter {
    let level = level.unwrap_or(DEFAULT_LEVEL);
    EnvFilter::try_new(format!(
        "taskpilot={level},reqwest=warn,hyper=warn,hyper_util=warn"
    ))
    .unwrap_or_else(|_| EnvFilter::new(format!("taskpilot={DEFAULT_LEVEL}")))
}

/// Deletes our log files older than `retention_days`. Errors are ignored.
fn cleanup_old_logs(log_dir: &Path, retention_days: u64) {
    let Ok(entries) = std::fs::read_dir(log_dir) else {
        return;
    };
    let now = SystemTime::now();
    let max_age = Duration::from_secs(60 * 60 * 24 * retention_days);

    for entry in entries.flatten() {
        let path = entry.path();
        let is_ours = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(LOG_FILE_PREFIX));
        if !is_ours || !path.is_file() {
            continue;
        }
        let age = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok());
        if age.is_some_and(|age| age > max_age) {
            let _ = std::fs::remove_file(path);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_keeps_fresh_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let ours = dir.path().join(format!("{LOG_FILE_PREFIX}.2026-01-01"));
        let foreign = dir.path().join("notes.txt");
        std::fs::write(&ours, "x").unwrap();
        std::fs::write(&foreign, "y").unwrap();

        cleanup_old_logs(dir.path(), RETENTION_DAYS);
        assert!(ours.exists());
        assert!(foreign.exists());
    }

    #[test]
    fn cleanup_tolerates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        cleanup_old_logs(&dir.path().join("absent"), RETENTION_DAYS);
    }

    #[test]
    fn invalid_level_falls_back() {
        let filter = default_filter(Some("not a level ==="));
        assert!(filter.to_string().contains("taskpilot"));
    }
}
