//! Deployment environment selector.

use serde::{Deserialize, Serialize};

/// Target environment of the publishing API.
///
/// Parsing is lenient: any name other than `dev` or `stage` selects
/// [`Environment::Prod`], which is also the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Environment {
    Dev,
    Stage,
    #[default]
    Prod,
}

impl Environment {
    /// Return the environment name as stored in the settings file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Stage => "stage",
            Self::Prod => "prod",
        }
    }

    /// Resolve an environment name, falling back to `Prod` for anything
    /// unrecognised.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dev" => Self::Dev,
            "stage" => Self::Stage,
            "prod" => Self::Prod,
            other => {
                tracing::warn!(environment = %other, "Unknown environment, using prod");
                Self::Prod
            }
        }
    }

    /// All valid environment values.
    pub fn all() -> &'static [Environment] {
        &[Self::Dev, Self::Stage, Self::Prod]
    }
}

impl From<String> for Environment {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
