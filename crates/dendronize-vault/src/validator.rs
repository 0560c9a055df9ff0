//! Heuristic check that a directory looks like an Obsidian vault.
//!
//! A directory qualifies when it has a `.obsidian` config directory at its
//! root, or when a Markdown note sits within two directory levels below the
//! root. The statistics pass is unbounded and purely informational.

use dendronize_core::{Error, Result, VaultStats, VaultValidation};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Config marker directory of an Obsidian vault
pub const VAULT_CONFIG_DIR: &str = ".obsidian";

/// Subdirectory levels searched below the root for Markdown notes
pub const MARKDOWN_SEARCH_DEPTH: usize = 2;

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".md"))
}

/// Whether the vault config marker directory exists at `root`
pub fn has_vault_config(root: &Path) -> bool {
    root.join(VAULT_CONFIG_DIR).is_dir()
}

/// Whether a Markdown note exists in `root` or up to `max_depth` levels of
/// non-hidden subdirectories below it
pub fn has_markdown_within_depth(root: &Path, max_depth: usize) -> bool {
    WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth + 1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && is_hidden(e)))
        .filter_map(|entry| entry.ok())
        .any(|entry| is_markdown_file(&entry))
}

/// Count folders, files and Markdown notes below `root`, skipping hidden entries
pub fn analyze_vault(root: &Path) -> VaultStats {
    let mut stats = VaultStats {
        has_vault_config: has_vault_config(root),
        ..Default::default()
    };

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Error analyzing {}: {}", root.display(), e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            stats.folders += 1;
        } else if file_type.is_file() {
            stats.total_files += 1;
            if is_markdown_file(&entry) {
                stats.markdown_files += 1;
            }
        }
    }

    stats
}

/// Validate a candidate source vault (blocking)
pub fn validate_vault(root: &Path) -> Result<VaultValidation> {
    if !root.is_dir() {
        return Err(Error::invalid_path(format!(
            "Not a directory: {}",
            root.display()
        )));
    }

    let stats = analyze_vault(root);
    let is_likely_valid =
        stats.has_vault_config || has_markdown_within_depth(root, MARKDOWN_SEARCH_DEPTH);

    log::debug!(
        "Validated {}: likely vault = {}, {} notes",
        root.display(),
        is_likely_valid,
        stats.markdown_files
    );

    Ok(VaultValidation {
        path: root.to_path_buf(),
        is_likely_valid,
        stats,
    })
}

/// Validate a candidate source vault without blocking the async runtime
pub async fn validate_source_vault(root: &Path) -> Result<VaultValidation> {
    let root = root.to_path_buf();
    tokio::task::spawn_blocking(move || validate_vault(&root))
        .await
        .map_err(|e| Error::other(format!("Vault validation task failed: {}", e)))?
}
