//! Settings persistence module.
//!
//! Settings live as pretty-printed JSON in `<config dir>/taskpilot/settings.json`.
//! Every field has a default, so a missing file or a partial file both load.
//! The API key may also come from the environment (`GEMINI_API_KEY`, then
//! `API_KEY`), which takes precedence over the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default REST base URL for the Gemini API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the API key, in priority order.
pub const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationSettings {
    /// Sampling temperature.
    pub temperature: f32,
    /// Top-k sampling cutoff.
    pub top_k: u32,
    /// Nucleus sampling cutoff.
    pub top_p: f32,
    /// Upper bound on reply length.
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 8192,
        }
    }
}

/// Collection form used for usage telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// URL receiving the form post.
    pub endpoint: String,
    /// Form entry id for the task name.
    pub task_entry: String,
    /// Form entry id for the event label.
    pub event_entry: String,
    /// Form entry id for the feedback comment.
    pub feedback_entry: String,
    /// Form entry id for the model name.
    pub model_entry: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            task_entry: "entry.2106795948".to_string(),
            event_entry: "entry.858960193".to_string(),
            feedback_entry: "entry.1474604342".to_string(),
            model_entry: "entry.265364207".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Returns true if an endpoint is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.endpoint.trim().is_empty()
    }
}

/// Persisted application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Model identifier sent to the API.
    pub model: String,
    /// REST base URL.
    pub api_base: String,
    /// API key. Environment variables override this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Log filter directive, e.g. `debug` or `taskpilot=trace`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Sampling parameters.
    pub generation: GenerationSettings,
    /// Usage telemetry form. Absent means telemetry is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<TelemetryConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            log_level: None,
            generation: GenerationSettings::default(),
            telemetry: None,
        }
    }
}

impl Settings {
    /// Overrides the API key from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Overrides the API key using `lookup` to read variables.
    ///
    /// The first non-blank variable in [`API_KEY_VARS`] wins.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
        {
            self.api_key = Some(key);
        }
    }

    /// Returns the API key if one is set and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Returns the telemetry form if telemetry is enabled.
    #[must_use]
    pub fn telemetry(&self) -> Option<&TelemetryConfig> {
        self.telemetry.as_ref().filter(|t| t.is_enabled())
    }
}

/// Loads settings from the specified settings file path.
///
/// If the file doesn't exist, returns default settings.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))
}

/// Saves settings to the specified settings file path.
///
/// The parent directory must exist (caller should ensure this).
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write settings file: {}", path.display()))
}
