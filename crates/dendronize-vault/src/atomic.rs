//! Atomic file writes: write to a hidden sibling temp file, then rename.
//!
//! A reader of the target directory never observes a half-written note or
//! stub, even if the run is interrupted mid-write.

use dendronize_core::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Write `contents` to `path`, creating parent directories as needed
pub async fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(Error::io)?;
    }

    let temp_path = temp_sibling(path)?;
    fs::write(&temp_path, contents).await.map_err(Error::io)?;

    if let Err(e) = fs::rename(&temp_path, path).await {
        let _ = fs::remove_file(&temp_path).await;
        return Err(Error::io(e));
    }

    Ok(())
}

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::invalid_path(format!("No file name in {}", path.display())))?;
    Ok(path.with_file_name(format!(".{}.dendronize-tmp", name)))
}
