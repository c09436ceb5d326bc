use std::path::PathBuf;

use obitpub_core::SourceModel;

use crate::settings::default_settings_path;

/// Process configuration loaded from environment variables.
///
/// Everything here is fixed for the lifetime of one command. The user's
/// own preferences (API key, environment, default owner) live in the
/// settings file instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the settings JSON file.
    pub settings_path: PathBuf,
    /// Bypass the API gateway and post to the intake service directly.
    pub direct_endpoint: bool,
    /// Shape of `source_info` the form collects.
    pub source_model: SourceModel,
    /// Copy the publish start date into a blank end date.
    pub default_end_date: bool,
    /// Echo requests and responses to stderr.
    pub console: bool,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                              |
    /// |----------------------------|--------------------------------------|
    /// | `OBITPUB_SETTINGS_PATH`    | `<config dir>/obitpub/config.json`   |
    /// | `OBITPUB_DIRECT_ENDPOINT`  | `false`                              |
    /// | `OBITPUB_SOURCE_MODEL`     | `publisher` (or `generic`)           |
    /// | `OBITPUB_DEFAULT_END_DATE` | `false`                              |
    /// | `OBITPUB_CONSOLE`          | `false`                              |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings_path = lookup("OBITPUB_SETTINGS_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_settings_path);

        let source_model = match lookup("OBITPUB_SOURCE_MODEL") {
            None => SourceModel::default(),
            Some(raw) => SourceModel::from_name(&raw).unwrap_or_else(|| {
                tracing::warn!(value = %raw, "Invalid OBITPUB_SOURCE_MODEL, using publisher");
                SourceModel::default()
            }),
        };

        Self {
            settings_path,
            direct_endpoint: flag(&lookup, "OBITPUB_DIRECT_ENDPOINT"),
            source_model,
            default_end_date: flag(&lookup, "OBITPUB_DEFAULT_END_DATE"),
            console: flag(&lookup, "OBITPUB_CONSOLE"),
        }
    }
}

/// Read a boolean variable. Unset or unparseable means `false`.
fn flag(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> bool {
    let Some(raw) = lookup(key) else {
        return false;
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "" | "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(key, value = %raw, "Invalid boolean, using false");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert!(!cfg.direct_endpoint);
        assert!(!cfg.default_end_date);
        assert!(!cfg.console);
        assert_eq!(cfg.source_model, SourceModel::Publisher);
        assert_eq!(cfg.settings_path, default_settings_path());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("OBITPUB_SETTINGS_PATH", "/tmp/obitpub.json"),
            ("OBITPUB_DIRECT_ENDPOINT", "true"),
            ("OBITPUB_SOURCE_MODEL", "generic"),
            ("OBITPUB_DEFAULT_END_DATE", "1"),
            ("OBITPUB_CONSOLE", "yes"),
        ]);
        assert_eq!(cfg.settings_path, PathBuf::from("/tmp/obitpub.json"));
        assert!(cfg.direct_endpoint);
        assert_eq!(cfg.source_model, SourceModel::Generic);
        assert!(cfg.default_end_date);
        assert!(cfg.console);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[
            ("OBITPUB_DIRECT_ENDPOINT", "maybe"),
            ("OBITPUB_SOURCE_MODEL", "adn"),
            ("OBITPUB_SETTINGS_PATH", "  "),
        ]);
        assert!(!cfg.direct_endpoint);
        assert_eq!(cfg.source_model, SourceModel::Publisher);
        assert_eq!(cfg.settings_path, default_settings_path());
    }
}
