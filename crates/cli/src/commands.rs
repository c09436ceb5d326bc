//! Command dispatch.

use std::io::Write;
use std::path::Path;

use obitpub_core::{calculate_age, Environment, SourceModel};

use crate::cli::{Command, FormCommand, SettingsCommand};
use crate::config::AppConfig;
use crate::console::Console;
use crate::render;
use crate::shell::{Shell, ShellError};
use crate::settings::Settings;

/// Fold per-command flags into the process configuration. Flags can only
/// switch options on.
pub fn apply_flags(command: &Command, mut config: AppConfig) -> AppConfig {
    if let Command::Publish(args) = command {
        config.direct_endpoint |= args.direct;
        config.console |= args.console;
    }
    config
}

/// Run one command. Results go to `out`, the activity console to `err`.
pub async fn run<O: Write, E: Write>(
    command: Command,
    config: AppConfig,
    out: &mut O,
    err: &mut E,
) -> Result<(), ShellError> {
    let mut shell = Shell::new(apply_flags(&command, config));

    match command {
        Command::Publish(args) => {
            let form = Shell::load_form(&args.form)?;
            let mut console = Console::new(&mut *err, shell.config().console);
            match shell.publish(form, &mut console).await {
                Ok(resp) => {
                    writeln!(out, "{}", render::success_panel(&resp))?;
                    Ok(())
                }
                Err(ShellError::Publish(e)) => {
                    writeln!(out, "{}", render::failure_panel(&e))?;
                    Err(ShellError::Publish(e))
                }
                Err(e) => Err(e),
            }
        }
        Command::Preview(args) => {
            let form = Shell::load_form(&args.form)?;
            let payload = shell.preview(form)?;
            let json = pretty_json(&payload)?;
            match args.output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    tracing::info!(path = %path.display(), "Payload written");
                }
                None => writeln!(out, "{json}")?,
            }
            Ok(())
        }
        Command::Age { dob, dod } => {
            let age = calculate_age(&dob, &dod)
                .map(|age| age.to_string())
                .unwrap_or_default();
            writeln!(out, "{age}")?;
            Ok(())
        }
        Command::Form(FormCommand::Init { output, force }) => {
            let json = pretty_json(&shell.blank_form())?;
            match output {
                Some(path) => write_new_file(&path, &json, force)?,
                None => writeln!(out, "{json}")?,
            }
            Ok(())
        }
        Command::Settings(SettingsCommand::Show) => {
            show_settings(shell.settings(), shell.config(), out)?;
            Ok(())
        }
        Command::Settings(SettingsCommand::Set(update)) => {
            let settings = shell.update_settings(update)?.clone();
            writeln!(out, "Settings saved.")?;
            show_settings(&settings, shell.config(), out)?;
            Ok(())
        }
    }
}

fn pretty_json<T: serde::Serialize>(value: &T) -> Result<String, ShellError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn write_new_file(path: &Path, contents: &str, force: bool) -> Result<(), ShellError> {
    if path.exists() && !force {
        return Err(ShellError::Exists(path.to_path_buf()));
    }
    std::fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Form written");
    Ok(())
}

fn show_settings<W: Write>(
    settings: &Settings,
    config: &AppConfig,
    out: &mut W,
) -> std::io::Result<()> {
    let api_key = if settings.has_api_key() {
        settings.masked_api_key()
    } else {
        "(not set)".to_string()
    };
    let environments = Environment::all()
        .iter()
        .map(|e| e.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "Settings file:    {}", config.settings_path.display())?;
    writeln!(out, "API key:          {api_key}")?;
    writeln!(out, "Environment:      {} ({environments})", settings.environment)?;
    writeln!(out, "Default owner:    {}", settings.default_owner)?;
    if config.source_model == SourceModel::Generic {
        writeln!(out, "Default source:   {}", settings.default_source)?;
        writeln!(out, "Default provider: {}", settings.default_provider)?;
    }
    Ok(())
}
