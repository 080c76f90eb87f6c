use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a CLI log-level name to an [`EnvFilter`] directive.
///
/// Unrecognised names are passed through unchanged so that full filter
/// directives such as `"insights_data=debug"` also work.
pub fn normalise_log_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to `log_file` when given (created or appended to), otherwise
/// to stderr. Falls back to `"warn"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalise_log_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Some(
                std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?,
            )
        }
        None => None,
    };

    let file_layer = file.map(|f| {
        fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(f))
    });
    let stderr_layer = if file_layer.is_none() {
        Some(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Default issue file name looked up by [`discover_data_path`].
pub const DEFAULT_ISSUES_FILE: &str = "issues.json";

/// Attempt to locate an issue export when no `--data-path` was given.
///
/// Checks the following paths in order and returns the first that exists:
/// 1. `./data/issues.json`
/// 2. `~/.label-insights/issues.json`
pub fn discover_data_path() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    discover_data_path_from(&cwd, dirs::home_dir().as_deref())
}

/// [`discover_data_path`] with explicit working and home directories.
pub fn discover_data_path_from(cwd: &Path, home: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = vec![cwd.join("data").join(DEFAULT_ISSUES_FILE)];
    if let Some(home) = home {
        candidates.push(home.join(".label-insights").join(DEFAULT_ISSUES_FILE));
    }
    candidates.into_iter().find(|p| p.exists())
}

/// Choose the data path: an explicit path wins, otherwise discovery runs.
pub fn resolve_data_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_data_path(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
