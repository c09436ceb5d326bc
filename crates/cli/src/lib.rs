//! Command-line shell for filling in and publishing obituaries.
//!
//! The binary in `main.rs` only wires up logging and argument parsing;
//! everything else lives here so integration tests can drive it.

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod render;
pub mod settings;
pub mod shell;

pub use cli::{Cli, Command};
pub use commands::{apply_flags, run};
pub use config::AppConfig;
pub use settings::Settings;
pub use shell::{Shell, ShellError};
