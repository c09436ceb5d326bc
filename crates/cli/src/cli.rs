use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Collect obituary details and publish them to the obituary API.
#[derive(Parser, Debug)]
#[command(name = "obitpub", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a form and publish it.
    Publish(PublishArgs),

    /// Build the payload from a form without sending it.
    Preview(PreviewArgs),

    /// Compute the age from MMDDYYYY birth and death dates.
    Age {
        /// Date of birth, MMDDYYYY (00 for unknown month or day).
        dob: String,
        /// Date of death, MMDDYYYY (00 for unknown month or day).
        dod: String,
    },

    /// Work with form files.
    #[command(subcommand)]
    Form(FormCommand),

    /// Show or change saved settings.
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// JSON form file.
    #[arg(long, short = 'f', value_name = "FILE")]
    pub form: PathBuf,

    /// Echo the request and response to stderr.
    #[arg(long, default_value_t = false)]
    pub console: bool,

    /// Bypass the API gateway and post to the intake service directly.
    #[arg(long, default_value_t = false)]
    pub direct: bool,
}

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// JSON form file.
    #[arg(long, short = 'f', value_name = "FILE")]
    pub form: PathBuf,

    /// Write the payload here instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum FormCommand {
    /// Write a blank form with saved defaults filled in.
    Init {
        /// Write the form here instead of stdout.
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the current settings with the API key masked.
    Show,

    /// Change one or more settings and save.
    Set(SettingsUpdate),
}

/// Settings fields to change. Omitted fields keep their current value.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct SettingsUpdate {
    #[arg(long)]
    pub api_key: Option<String>,

    /// dev, stage or prod.
    #[arg(long)]
    pub environment: Option<String>,

    #[arg(long)]
    pub default_owner: Option<String>,

    #[arg(long)]
    pub default_source: Option<String>,

    #[arg(long)]
    pub default_provider: Option<String>,
}
