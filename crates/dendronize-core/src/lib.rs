//! # Dendronize Core
//!
//! Core data models, error types, and configuration for the Obsidian to
//! Dendron vault importer. This crate defines the canonical types that all
//! other crates depend on.
//!
//! ## Core Modules
//!
//! - [`models`] - Scan entries, run bookkeeping and vault statistics
//! - [`error`] - Error taxonomy and Result alias
//! - [`config`] - Per-run transform options and persisted settings
//! - [`utils`] - Serialization and path helpers
//!
//! ## Usage Examples
//!
//! ```
//! use dendronize_core::prelude::*;
//!
//! let options = TransformOptions::new()
//!     .preserve_metadata(false)
//!     .create_hierarchy_stubs(true);
//! assert!(options.convert_hierarchy);
//!
//! let mut stats = RunStats::start();
//! stats.total_files = 2;
//! stats.record_processed("Projects/a.md", "projects.a.md");
//! stats.finalize();
//! assert_eq!(stats.skipped_files, 1);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod utils;

pub use config::*;
pub use error::{Error, Result};
pub use models::*;
pub use utils::{CsvBuilder, to_json_string};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{ImportSettings, TransformOptions};
    pub use crate::error::{Error, Result};
    pub use crate::models::{FileEntry, FileOutcome, RunStats, VaultStats, VaultValidation};
}
