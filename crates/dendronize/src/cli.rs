//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use dendronize_core::TransformOptions;
use dendronize_export::ExportFormat;
use std::path::PathBuf;

/// Settings file used when none is given
pub const DEFAULT_SETTINGS_FILE: &str = ".dendronize.yml";

/// Dendronize - convert Obsidian vaults into Dendron vaults
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (YAML)
    #[arg(long, global = true, env = "DENDRONIZE_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format on stderr
    #[arg(long, global = true, env = "DENDRONIZE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import an Obsidian vault into a Dendron vault
    Import(ImportArgs),
    /// Check whether a directory looks like an Obsidian vault
    Validate(ValidateArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// Obsidian vault to import (defaults to the saved import path)
    #[arg(short, long, env = "DENDRONIZE_SOURCE")]
    pub source: Option<PathBuf>,

    /// Directory receiving the Dendron notes (defaults to the saved target path)
    #[arg(short, long, env = "DENDRONIZE_TARGET")]
    pub target: Option<PathBuf>,

    /// Flatten folders into dot-delimited note names
    #[arg(long, env = "DENDRONIZE_CONVERT_HIERARCHY", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub convert_hierarchy: Option<bool>,

    /// Keep the leading `---` metadata block of each note
    #[arg(long, env = "DENDRONIZE_PRESERVE_METADATA", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub preserve_metadata: Option<bool>,

    /// Rewrite `[[wikilinks]]` into hierarchy identifiers
    #[arg(long, env = "DENDRONIZE_CONVERT_WIKILINKS", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub convert_wiki_links: Option<bool>,

    /// Write one `<hierarchy>.schema.yml` per parent hierarchy
    #[arg(long, env = "DENDRONIZE_CREATE_STUBS", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub create_hierarchy_stubs: Option<bool>,

    /// Copy images, audio, video and PDFs into `assets/`
    #[arg(long, env = "DENDRONIZE_HANDLE_ASSETS", num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub handle_assets: Option<bool>,

    /// Skip entries with this name while scanning (repeatable)
    #[arg(long = "exclude", value_name = "NAME")]
    pub excluded_names: Vec<String>,

    /// Report format printed on stdout
    #[arg(long, default_value_t = ExportFormat::Text)]
    pub report: ExportFormat,

    /// Remember source, target and options in the settings file
    #[arg(long)]
    pub save_defaults: bool,
}

impl ImportArgs {
    /// Apply the flags given on the command line on top of `base`
    pub fn merge_options(&self, base: TransformOptions) -> TransformOptions {
        let mut options = base;
        if let Some(enabled) = self.convert_hierarchy {
            options.convert_hierarchy = enabled;
        }
        if let Some(enabled) = self.preserve_metadata {
            options.preserve_metadata = enabled;
        }
        if let Some(enabled) = self.convert_wiki_links {
            options.convert_wiki_links = enabled;
        }
        if let Some(enabled) = self.create_hierarchy_stubs {
            options.create_hierarchy_stubs = enabled;
        }
        if let Some(enabled) = self.handle_assets {
            options.handle_assets = enabled;
        }
        options
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Directory to inspect
    pub dir: PathBuf,

    /// Report format printed on stdout
    #[arg(long, default_value_t = ExportFormat::Text)]
    pub report: ExportFormat,
}
