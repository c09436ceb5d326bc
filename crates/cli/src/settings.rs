//! Settings persisted to a small JSON file.
//!
//! The file is read once at startup and overwritten wholesale on save.
//! A missing or damaged file never blocks the shell: defaults are used
//! instead.

use std::path::{Path, PathBuf};

use obitpub_core::Environment;
use serde::{Deserialize, Serialize};

/// File name inside the per-user config directory.
const SETTINGS_FILE: &str = "config.json";

/// Directory name inside the platform config directory.
const APP_DIR: &str = "obitpub";

/// Errors from saving settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("Failed to write settings to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// User settings. Keys are camelCase on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub api_key: String,
    pub environment: Environment,
    pub default_owner: String,
    /// Prefills `source` in the generic source model.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_source: String,
    /// Prefills `provider` in the generic source model.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_provider: String,
}

/// Default settings location: `<config dir>/obitpub/config.json`, or
/// `./config.json` when the platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
}

/// Show only the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn non_blank(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

impl Settings {
    /// Read settings from `path`. Returns defaults when the file is
    /// missing, unreadable or not valid JSON.
    pub fn load(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read settings, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Check the settings can be saved.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.api_key.trim().is_empty() {
            return Err(SettingsError::MissingApiKey);
        }
        Ok(())
    }

    /// Validate and write the settings to `path`, replacing the file.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        self.validate()?;

        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(io_err)?;

        tracing::info!(path = %path.display(), environment = %self.environment, "Settings saved");
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        non_blank(&self.api_key).is_some()
    }

    pub fn masked_api_key(&self) -> String {
        mask_secret(self.api_key.trim())
    }

    pub fn default_owner(&self) -> Option<&str> {
        non_blank(&self.default_owner)
    }

    pub fn default_source(&self) -> Option<&str> {
        non_blank(&self.default_source)
    }

    pub fn default_provider(&self) -> Option<&str> {
        non_blank(&self.default_provider)
    }
}
