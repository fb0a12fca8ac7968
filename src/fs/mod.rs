//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod attachment;
pub mod settings;

pub use attachment::{Attachment, AttachmentError, read_attachment};
pub use settings::{
    GenerationSettings, Settings, TelemetryConfig, load_settings, save_settings,
};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "taskpilot";

/// Holds all taskpilot-related paths.
///
/// Tests root everything in a temporary directory via [`AppPaths::new`];
/// production code uses [`AppPaths::from_system`].
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use taskpilot::fs::AppPaths;
///
/// let paths = AppPaths::new(Path::new("/tmp/test"));
/// assert_eq!(paths.settings_file(), Path::new("/tmp/test/config/settings.json"));
/// assert_eq!(paths.log_dir(), Path::new("/tmp/test/data/logs"));
/// ```
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
    settings_override: Option<PathBuf>,
}

impl AppPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            config_dir: base.join("config"),
            data_dir: base.join("data"),
            settings_override: None,
        }
    }

    /// Creates paths under the platform config and data directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform directories cannot be determined.
    pub fn from_system() -> anyhow::Result<Self> {
        let config = dirs::config_dir().context("Could not determine config directory")?;
        let data = dirs::data_dir().context("Could not determine data directory")?;
        Ok(Self {
            config_dir: config.join(APP_DIR),
            data_dir: data.join(APP_DIR),
            settings_override: None,
        })
    }

    /// Uses `path` as the settings file instead of the default location.
    #[must_use]
    pub fn with_settings_file(mut self, path: PathBuf) -> Self {
        self.settings_override = Some(path);
        self
    }

    /// Returns the config directory.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the settings file path.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.settings_override
            .clone()
            .unwrap_or_else(|| self.config_dir.join("settings.json"))
    }

    /// Returns the log directory path.
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Loads settings from the settings file.
    ///
    /// If the file doesn't exist, returns default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_settings(&self) -> anyhow::Result<Settings> {
        load_settings(&self.settings_file())
    }

    /// Saves settings, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file cannot be written.
    pub fn save_settings(&self, settings: &Settings) -> anyhow::Result<()> {
        let path = self.settings_file();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        save_settings(&path, settings)
    }

    /// Writes default settings and returns the file path.
    ///
    /// The existing file is never parsed, so `force` also replaces a file
    /// that no longer loads.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists and `force` is false, or if it
    /// cannot be written.
    pub fn write_default_settings(&self, force: bool) -> anyhow::Result<PathBuf> {
        let path = self.settings_file();
        if path.exists() && !force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        self.save_settings(&Settings::default())?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_derived_from_base() {
        let paths = AppPaths::new(Path::new("/test/base"));

        assert_eq!(paths.config_dir(), Path::new("/test/base/config"));
        assert_eq!(
            paths.settings_file(),
            Path::new("/test/base/config/settings.json")
        );
        assert_eq!(paths.log_dir(), Path::new("/test/base/data/logs"));
    }

    #[test]
    fn settings_override_replaces_default_location() {
        let paths =
            AppPaths::new(Path::new("/test/base")).with_settings_file(PathBuf::from("/etc/tp.json"));
        assert_eq!(paths.settings_file(), Path::new("/etc/tp.json"));
        assert_eq!(paths.log_dir(), Path::new("/test/base/data/logs"));
    }

    #[test]
    fn save_creates_config_dir() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::new(temp.path());

        assert!(!paths.config_dir().exists());
        paths.save_settings(&Settings::default()).unwrap();
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn write_defaults_refuses_existing_file_without_force() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::new(temp.path());
        let custom = Settings {
            model: "gemini-2.5-pro".to_string(),
            ..Settings::default()
        };
        paths.save_settings(&custom).unwrap();

        assert!(paths.write_default_settings(false).is_err());
        assert_eq!(paths.load_settings().unwrap(), custom);
    }

    #[test]
    fn write_defaults_with_force_replaces_corrupt_file() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::new(temp.path());
        std::fs::create_dir_all(paths.config_dir()).unwrap();
        std::fs::write(paths.settings_file(), "{ not json").unwrap();
        assert!(paths.load_settings().is_err());

        let written = paths.write_default_settings(true).unwrap();
        assert_eq!(written, paths.settings_file());
        assert_eq!(paths.load_settings().unwrap(), Settings::default());
    }

    #[test]
    fn save_and_load_settings_roundtrip() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::new(temp.path());

        let settings = Settings {
            model: "gemini-2.5-pro".to_string(),
            log_level: Some("debug".to_string()),
            ..Settings::default()
        };

        paths.save_settings(&settings).unwrap();
        assert_eq!(paths.load_settings().unwrap(), settings);
    }
}
