use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.immigrant-helper/` directory hierarchy exists.
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ensure_directories_in(&home)
}

/// Create `<base>/.immigrant-helper/{data,logs}` and return the app directory.
pub fn ensure_directories_in(base: &Path) -> anyhow::Result<PathBuf> {
    let app_dir = base.join(".immigrant-helper");
    std::fs::create_dir_all(app_dir.join("data"))?;
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`, `CRITICAL`) to a
/// tracing filter directive. Unknown names are passed through unchanged.
pub fn filter_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to `log_file` (appended) when given, otherwise to stderr.
/// Falls back to `"warn"` if the level string is not a valid filter.
pub fn setup_logging(log_level: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories_in() {
        let tmp = TempDir::new().expect("tempdir");
        let app_dir = ensure_directories_in(tmp.path()).expect("ensure_directories_in should succeed");

        assert_eq!(app_dir, tmp.path().join(".immigrant-helper"));
        assert!(app_dir.join("data").is_dir(), "data subdir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    #[test]
    fn test_ensure_directories_in_is_idempotent() {
        let tmp = TempDir::new().expect("tempdir");
        ensure_directories_in(tmp.path()).expect("first");
        ensure_directories_in(tmp.path()).expect("second");
    }

    #[test]
    fn test_filter_directive_maps_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("info"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("helper_data=trace"), "helper_data=trace");
    }
}
