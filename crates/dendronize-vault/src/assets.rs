//! Asset relocation: non-Markdown attachments are copied verbatim under
//! `assets/` in the target, keeping their relative sub-path.

use dendronize_core::{Error, FileEntry, Result};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Directory (relative to the target root) receiving all assets
pub const ASSETS_DIR: &str = "assets";

/// Extensions (lower-case, without dot) treated as assets
pub const ASSET_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "webp", "svg", "bmp",
    // documents
    "pdf",
    // audio
    "mp3", "wav", "ogg", "m4a",
    // video
    "mp4", "webm", "mov",
];

/// Whether `entry` is an asset file, judged by extension
pub fn is_asset(entry: &FileEntry) -> bool {
    !entry.is_directory
        && entry
            .extension()
            .is_some_and(|ext| ASSET_EXTENSIONS.contains(&ext.as_str()))
}

/// Target path of an asset relative to the target root, `/`-delimited
pub fn asset_target(entry: &FileEntry) -> String {
    let sub_path = if entry.relative_path.contains('/') {
        entry.relative_path.as_str()
    } else {
        entry.name.as_str()
    };
    format!("{}/{}", ASSETS_DIR, sub_path)
}

/// Copies asset files into the target's `assets/` subtree
#[derive(Debug, Clone)]
pub struct AssetRelocator {
    target_root: PathBuf,
}

impl AssetRelocator {
    /// Create a relocator writing below `target_root`
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
        }
    }

    /// Absolute `assets/` directory
    pub fn assets_dir(&self) -> PathBuf {
        self.target_root.join(ASSETS_DIR)
    }

    /// Absolute destination of `entry`
    pub fn destination(&self, entry: &FileEntry) -> PathBuf {
        join_slash_path(&self.target_root, &asset_target(entry))
    }

    /// Copy one asset byte-for-byte, creating directories on demand.
    ///
    /// Returns the target-relative destination.
    #[instrument(skip(self, entry), fields(asset = %entry.relative_path), name = "asset_relocate")]
    pub async fn relocate(&self, entry: &FileEntry) -> Result<String> {
        let relative = asset_target(entry);
        let destination = join_slash_path(&self.target_root, &relative);

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(Error::io)?;
        }

        let bytes = tokio::fs::copy(&entry.path, &destination)
            .await
            .map_err(Error::io)?;
        log::debug!("Copied {} ({} bytes) -> {}", entry.relative_path, bytes, relative);

        Ok(relative)
    }
}

/// Join a `/`-delimited relative path onto `base` component by component
pub(crate) fn join_slash_path(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}
