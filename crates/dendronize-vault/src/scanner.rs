//! Source tree scanning.
//!
//! Produces a flat, depth-first list of [`FileEntry`] records. A directory is
//! emitted before its descendants. The traversal uses an explicit stack, so
//! deep trees never grow the call stack, and an unreadable subdirectory only
//! costs its own subtree. A listing that fails partway keeps the entries read
//! before the failure.

use dendronize_core::config::DEFAULT_EXCLUDED_NAMES;
use dendronize_core::{Error, FileEntry, Result};
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Everything one scan discovered
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Entries in depth-first order
    pub entries: Vec<FileEntry>,
    /// One line per subtree that could not be read
    pub warnings: Vec<String>,
}

impl ScanReport {
    /// All non-directory entries
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.iter().filter(|e| !e.is_directory)
    }

    /// Markdown notes, in scan order
    pub fn markdown_files(&self) -> Vec<&FileEntry> {
        self.entries.iter().filter(|e| e.is_markdown()).collect()
    }

    /// Number of directories discovered
    pub fn directory_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory).count()
    }
}

#[derive(Debug)]
struct PendingEntry {
    path: PathBuf,
    relative_path: String,
    is_directory: bool,
}

/// Recursive directory scanner skipping hidden and denylisted entries
#[derive(Debug, Clone)]
pub struct TreeScanner {
    root: PathBuf,
    excluded: BTreeSet<String>,
}

impl TreeScanner {
    /// Create a scanner for `root` with the default denylist
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded: DEFAULT_EXCLUDED_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Also skip entries called `name`
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.excluded.insert(name.into());
        self
    }

    /// Also skip every entry named in `names`
    pub fn exclude_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether an entry with this name is left out of the scan
    pub fn is_skipped(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded.contains(name)
    }

    /// Walk the whole tree.
    ///
    /// Fails only when the root itself cannot be read.
    #[instrument(skip(self), fields(root = ?self.root), name = "tree_scan")]
    pub async fn scan(&self) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        let root_children = self
            .read_children(&self.root, "", &mut report)
            .await
            .map_err(|e| Error::scan_failed(&self.root, e))?;

        let mut stack: Vec<PendingEntry> = root_children.into_iter().rev().collect();

        while let Some(pending) = stack.pop() {
            if !pending.is_directory {
                report
                    .entries
                    .push(FileEntry::file(pending.path, pending.relative_path));
                continue;
            }

            report.entries.push(FileEntry::directory(
                pending.path.clone(),
                pending.relative_path.clone(),
            ));

            match self
                .read_children(&pending.path, &pending.relative_path, &mut report)
                .await
            {
                Ok(children) => stack.extend(children.into_iter().rev()),
                Err(e) => {
                    let message = format!(
                        "Error scanning directory {}: {}",
                        pending.path.display(),
                        e
                    );
                    log::warn!("{}", message);
                    report.warnings.push(message);
                }
            }
        }

        log::debug!(
            "Scanned {}: {} entries, {} warnings",
            self.root.display(),
            report.entries.len(),
            report.warnings.len()
        );

        Ok(report)
    }

    /// Read one directory level, sorted by name
    async fn read_children(
        &self,
        dir: &Path,
        base: &str,
        report: &mut ScanReport,
    ) -> io::Result<Vec<PendingEntry>> {
        let mut read_dir = tokio::fs::read_dir(dir).await?;
        let mut listing = Vec::new();
        while let Some(item) = read_dir.next_entry().await.transpose() {
            let failed = item.is_err();
            listing.push(item);
            if failed {
                break;
            }
        }

        let (entries, error) = take_until_error(listing);
        if let Some(e) = error {
            let message = format!(
                "Error reading directory {} after {} entries: {}",
                dir.display(),
                entries.len(),
                e
            );
            log::warn!("{}", message);
            report.warnings.push(message);
        }

        let mut children = Vec::new();
        for entry in entries {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    let message = format!(
                        "Skipping entry with non UTF-8 name {:?} in {}",
                        raw,
                        dir.display()
                    );
                    log::warn!("{}", message);
                    report.warnings.push(message);
                    continue;
                }
            };

            if self.is_skipped(&name) {
                log::trace!("Skipping {}", name);
                continue;
            }

            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    let message = format!("Cannot stat {}: {}", entry.path().display(), e);
                    log::warn!("{}", message);
                    report.warnings.push(message);
                    continue;
                }
            };

            let is_directory = if file_type.is_dir() {
                true
            } else if file_type.is_file() {
                false
            } else {
                log::debug!("Skipping non-regular entry {}", entry.path().display());
                continue;
            };

            let relative_path = if base.is_empty() {
                name
            } else {
                format!("{}/{}", base, name)
            };

            children.push(PendingEntry {
                path: entry.path(),
                relative_path,
                is_directory,
            });
        }

        children.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok(children)
    }
}

/// Items up to the first error, plus that error
fn take_until_error<T>(
    items: impl IntoIterator<Item = io::Result<T>>,
) -> (Vec<T>, Option<io::Error>) {
    let mut ok = Vec::new();
    for item in items {
        match item {
            Ok(value) => ok.push(value),
            Err(e) => return (ok, Some(e)),
        }
    }
    (ok, None)
}
