//! The interactive surface: form preparation, publish orchestration and
//! settings edits.
//!
//! One [`Shell`] serves one command. It owns the settings loaded at
//! startup and replaces them wholesale when they are saved.

use std::io::Write;
use std::path::{Path, PathBuf};

use obitpub_client::{PublishClient, PublishError, PublishResponse, Routing};
use obitpub_core::payload::ValidationError;
use obitpub_core::{build_payload, BuilderOptions, CoreError, Environment, FormState, ObituaryPayload};

use crate::cli::SettingsUpdate;
use crate::config::AppConfig;
use crate::console::Console;
use crate::render;
use crate::settings::{Settings, SettingsError};

pub const MSG_NOT_CONFIGURED: &str = "Please configure your API key in Settings first.";

/// Everything that can stop a command.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Please configure your API key in Settings first.")]
    NotConfigured,

    #[error("Failed to read {}: {source}", .path.display())]
    ReadForm {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Form(#[from] CoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    Exists(PathBuf),

    #[error("Failed to encode JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShellError {
    /// Single line suitable for the status area.
    pub fn status_message(&self) -> String {
        match self {
            Self::Publish(e) => render::failure_status(e),
            other => other.to_string(),
        }
    }

    /// Follow-up hint shown under the status line, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotConfigured | Self::Settings(SettingsError::MissingApiKey) => {
                Some("Run `obitpub settings set --api-key <KEY>` to configure it.")
            }
            _ => None,
        }
    }
}

pub struct Shell {
    config: AppConfig,
    settings: Settings,
    client: PublishClient,
}

impl Shell {
    /// Load settings from the configured path and build a client for the
    /// configured routing.
    pub fn new(config: AppConfig) -> Self {
        let settings = Settings::load(&config.settings_path);
        if !settings.has_api_key() {
            tracing::warn!("Please configure your API key in Settings before publishing.");
        }
        let client = PublishClient::new(Routing::from_direct_flag(config.direct_endpoint));
        Self::with_parts(config, settings, client)
    }

    pub fn with_parts(config: AppConfig, settings: Settings, client: PublishClient) -> Self {
        Self {
            config,
            settings,
            client,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn routing(&self) -> &Routing {
        self.client.routing()
    }

    pub fn builder_options(&self) -> BuilderOptions {
        BuilderOptions {
            source_model: self.config.source_model,
        }
    }

    /// Read a JSON form file.
    pub fn load_form(path: &Path) -> Result<FormState, ShellError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ShellError::ReadForm {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(FormState::from_json_str(&raw)?)
    }

    /// Blank form with saved defaults filled in.
    pub fn blank_form(&self) -> FormState {
        let mut form = FormState::default();
        self.apply_settings_defaults(&mut form);
        form
    }

    /// Fill defaults and derived values the way the form would after
    /// the user finished editing it.
    pub fn prepare_form(&self, mut form: FormState) -> FormState {
        self.apply_settings_defaults(&mut form);
        form.fill_missing_age();
        if self.config.default_end_date {
            form.default_end_date_to_start();
        }
        form
    }

    fn apply_settings_defaults(&self, form: &mut FormState) {
        form.apply_defaults(
            self.settings.default_owner(),
            self.settings.default_source(),
            self.settings.default_provider(),
        );
    }

    /// Prepare and validate a form, returning the payload it would send.
    pub fn preview(&self, form: FormState) -> Result<ObituaryPayload, ShellError> {
        let form = self.prepare_form(form);
        Ok(build_payload(&form, self.builder_options())?)
    }

    /// Validate and publish a form.
    ///
    /// Refuses to run without an API key. The payload is rebuilt from the
    /// form on every call, so a retry gets a fresh `version`.
    pub async fn publish<W: Write>(
        &self,
        form: FormState,
        console: &mut Console<W>,
    ) -> Result<PublishResponse, ShellError> {
        if !self.settings.has_api_key() {
            return Err(ShellError::NotConfigured);
        }

        let payload = self.preview(form)?;
        let environment = self.settings.environment;
        let api_key = self.settings.api_key.trim();

        if console.is_enabled() {
            let body = serde_json::to_value(&payload)?;
            if let Err(e) = console.request(&self.client.endpoint_url(environment), api_key, &body) {
                tracing::warn!(error = %e, "Failed to write request to activity console");
            }
        }

        let result = self.client.publish(api_key, environment, &payload).await;
        if let Err(e) = console.response(&result) {
            tracing::warn!(error = %e, "Failed to write response to activity console");
        }

        Ok(result?)
    }

    /// Merge `update` into the current settings, validate and save. The
    /// in-memory settings are replaced only after the file is written.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<&Settings, ShellError> {
        let mut next = self.settings.clone();
        if let Some(api_key) = update.api_key {
            next.api_key = api_key.trim().to_string();
        }
        if let Some(environment) = update.environment {
            next.environment = Environment::from_name(&environment);
        }
        if let Some(owner) = update.default_owner {
            next.default_owner = owner.trim().to_string();
        }
        if let Some(source) = update.default_source {
            next.default_source = source.trim().to_string();
        }
        if let Some(provider) = update.default_provider {
            next.default_provider = provider.trim().to_string();
        }

        next.save(&self.config.settings_path)?;
        self.settings = next;
        Ok(&self.settings)
    }
}
