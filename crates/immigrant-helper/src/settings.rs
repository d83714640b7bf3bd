use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Connect immigrants with volunteer mentors and community resources
#[derive(Parser, Debug, Clone)]
#[command(
    name = "immigrant-helper",
    about = "Connect immigrants with volunteer mentors and community resources",
    version
)]
pub struct Settings {
    /// Directory holding immigrants.json, mentors.json and resources.json
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (logs go to stderr when unset)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Start with empty mentor and resource lists instead of demo data
    #[arg(long)]
    pub no_demo_data: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.immigrant-helper/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".immigrant-helper").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(std::env::args_os().collect(), &LastUsedParams::config_path())
    }

    /// Same as [`Settings::load_with_last_used`] with explicit arguments and
    /// config path.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Could not clear {}: {}", config_path.display(), e);
            }
            return settings.apply_debug();
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins over persisted values.
        if settings.data_dir.is_none() {
            settings.data_dir = last.data_dir;
        }
        if !is_arg_explicitly_set(&matches, "log_level") {
            if let Some(v) = last.log_level {
                settings.log_level = v;
            }
        }
        if settings.log_file.is_none() {
            settings.log_file = last.log_file;
        }

        // Persist before --debug so a one-off debug run does not stick.
        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::warn!("Could not save {}: {}", config_path.display(), e);
        }

        settings.apply_debug()
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_dir: s.data_dir.clone(),
            log_level: Some(s.log_level.clone()),
            log_file: s.log_file.clone(),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    // ── LastUsedParams ────────────────────────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            data_dir: Some(PathBuf::from("/srv/helper")),
            log_level: Some("INFO".to_string()),
            log_file: Some(PathBuf::from("/var/log/helper.log")),
        };
        params.save_to(&path).expect("save");
        assert_eq!(LastUsedParams::load_from(&path), params);
    }

    #[test]
    fn test_last_used_params_default_when_missing_or_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{oops").unwrap();
        assert_eq!(LastUsedParams::load_from(&path), LastUsedParams::default());
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&path).expect("save");
        assert!(path.exists());
        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    // ── Settings parsing ──────────────────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["immigrant-helper"]);
        assert!(settings.data_dir.is_none());
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.no_demo_data);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_cli_data_dir() {
        let settings = Settings::parse_from(["immigrant-helper", "--data-dir", "/tmp/helper"]);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/helper")));
    }

    #[test]
    fn test_settings_rejects_unknown_log_level() {
        assert!(Settings::try_parse_from(["immigrant-helper", "--log-level", "LOUD"]).is_err());
    }

    // ── load_with_last_used ───────────────────────────────────────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_values() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            data_dir: Some(PathBuf::from("/srv/helper")),
            log_level: Some("ERROR".to_string()),
            log_file: None,
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(vec!["immigrant-helper".into()], &config_path);
        assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/helper")));
        assert_eq!(settings.log_level, "ERROR");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams {
            data_dir: Some(PathBuf::from("/srv/helper")),
            log_level: Some("ERROR".to_string()),
            log_file: None,
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec![
                "immigrant-helper".into(),
                "--data-dir".into(),
                "/tmp/other".into(),
                "--log-level".into(),
                "INFO".into(),
            ],
            &config_path,
        );
        assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/other")));
        assert_eq!(settings.log_level, "INFO");
        assert_eq!(
            LastUsedParams::load_from(&config_path).data_dir,
            Some(PathBuf::from("/tmp/other"))
        );
    }

    #[test]
    fn test_load_with_last_used_debug_not_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings =
            Settings::load_with_last_used_impl(vec!["immigrant-helper".into(), "--debug".into()], &config_path);
        assert_eq!(settings.log_level, "DEBUG");
        assert_eq!(
            LastUsedParams::load_from(&config_path).log_level,
            Some("WARNING".to_string())
        );
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);
        LastUsedParams::default().save_to(&config_path).expect("save");

        Settings::load_with_last_used_impl(vec!["immigrant-helper".into(), "--clear".into()], &config_path);
        assert!(!config_path.exists(), "file must be gone after --clear");
    }
}
