//! # Dendronize
//!
//! Command-line front end of the Obsidian to Dendron importer.
//!
//! ```text
//! dendronize import --source ~/obsidian --target ~/dendron --create-hierarchy-stubs
//! dendronize validate ~/obsidian --report json
//! ```
//!
//! Settings live in a YAML file (`--settings`, default `.dendronize.yml`).
//! Flags and `DENDRONIZE_*` environment variables override them.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Command, ImportArgs, LogFormat, ValidateArgs};

use anyhow::Context;
use dendronize_core::ImportSettings;
use std::process::ExitCode;

/// Load settings, install logging and dispatch the subcommand
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = ImportSettings::load(&cli.settings)
        .await
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    let level = logging::effective_level(&settings.log_level, cli.verbose);
    logging::init_logging(&level, cli.log_format)?;
    log::debug!("Dendronize v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Import(args) => commands::import(args, settings, &cli.settings).await,
        Command::Validate(args) => commands::validate(args).await,
    }
}
