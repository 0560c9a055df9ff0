//! # Dendronize Vault
//!
//! File-system side of the importer:
//!
//! - [`scanner::TreeScanner`] - depth-first enumeration of the source vault
//! - [`assets::AssetRelocator`] - verbatim asset copies under `assets/`
//! - [`validator`] - "does this look like an Obsidian vault?" heuristics
//! - [`atomic::write_atomic`] - temp-file-and-rename writes
//!
//! ## Quick Start
//!
//! ```no_run
//! use dendronize_vault::prelude::*;
//! use std::path::Path;
//!
//! # async fn example() -> Result<()> {
//! let validation = validate_source_vault(Path::new("/path/to/obsidian")).await?;
//! println!("looks like a vault: {}", validation.is_likely_valid);
//!
//! let report = TreeScanner::new("/path/to/obsidian").scan().await?;
//! for note in report.markdown_files() {
//!     println!("{}", note.relative_path);
//! }
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod atomic;
pub mod scanner;
pub mod validator;

pub use assets::{ASSET_EXTENSIONS, ASSETS_DIR, AssetRelocator, asset_target, is_asset};
pub use atomic::write_atomic;
pub use scanner::{ScanReport, TreeScanner};
pub use validator::{
    MARKDOWN_SEARCH_DEPTH, VAULT_CONFIG_DIR, analyze_vault, has_markdown_within_depth,
    has_vault_config, validate_source_vault, validate_vault,
};

pub mod prelude {
    pub use crate::assets::*;
    pub use crate::atomic::*;
    pub use crate::scanner::*;
    pub use crate::validator::*;
    pub use dendronize_core::prelude::*;
}
