//! Core data models shared by the scanner, the transforms and the orchestrator.
//!
//! These types are designed to be:
//! - **Serializable**: run results can be exported as JSON/CSV
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Owned**: a run owns its [`RunStats`] exclusively, nothing is shared

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File extension (without dot) recognized as a Markdown note
pub const MARKDOWN_EXTENSION: &str = "md";

/// One entry discovered by a tree scan.
///
/// `relative_path` always uses `/` as separator, whatever the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute location on disk
    pub path: PathBuf,
    /// Final path component
    pub name: String,
    /// Slash-delimited path relative to the scan root
    pub relative_path: String,
    pub is_directory: bool,
}

impl FileEntry {
    /// Create a file entry
    pub fn file(path: impl Into<PathBuf>, relative_path: impl Into<String>) -> Self {
        Self::new(path.into(), relative_path.into(), false)
    }

    /// Create a directory entry
    pub fn directory(path: impl Into<PathBuf>, relative_path: impl Into<String>) -> Self {
        Self::new(path.into(), relative_path.into(), true)
    }

    fn new(path: PathBuf, relative_path: String, is_directory: bool) -> Self {
        let name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path.as_str())
            .to_string();
        Self {
            path,
            name,
            relative_path,
            is_directory,
        }
    }

    /// Lower-cased extension of the entry name, if any
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Whether this entry is a Markdown note (`.md`, case-sensitive)
    pub fn is_markdown(&self) -> bool {
        !self.is_directory && self.relative_path.ends_with(".md")
    }
}

/// Outcome for one attempted file of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOutcome {
    /// Source path relative to the source root
    pub source: String,
    /// Target path relative to the target root
    pub target: Option<String>,
    pub processed: bool,
    pub error: Option<String>,
}

/// Bookkeeping for one import run.
///
/// Created when the run starts, finalized exactly once when it ends
/// (success, failure or cancellation), then handed to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStats {
    /// Unique run identifier
    pub run_id: String,
    /// Markdown files plus eligible assets discovered
    pub total_files: usize,
    pub processed_files: usize,
    /// `total_files - processed_files`, derived at finalization
    pub skipped_files: usize,
    /// Per-file failures, each naming the file and the cause
    pub errors: Vec<String>,
    /// Non-fatal observations (unreadable subdirectories, target collisions)
    pub warnings: Vec<String>,
    /// Every attempted file in processing order
    pub outcomes: Vec<FileOutcome>,
    /// Hierarchy stub files written, by file name
    pub stubs_written: Vec<String>,
    /// Whether the run stopped early because cancellation was requested
    pub cancelled: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl RunStats {
    /// Start a new run accumulator
    pub fn start() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            total_files: 0,
            processed_files: 0,
            skipped_files: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            outcomes: Vec::new(),
            stubs_written: Vec::new(),
            cancelled: false,
            start_time: Utc::now(),
            end_time: None,
        }
    }

    /// Record a file that was written successfully
    pub fn record_processed(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.processed_files += 1;
        self.outcomes.push(FileOutcome {
            source: source.into(),
            target: Some(target.into()),
            processed: true,
            error: None,
        });
    }

    /// Record a per-file failure; `message` is the full human-readable error line
    pub fn record_failure(
        &mut self,
        source: impl Into<String>,
        target: Option<String>,
        message: impl Into<String>,
    ) {
        let message = message.into();
        self.errors.push(message.clone());
        self.outcomes.push(FileOutcome {
            source: source.into(),
            target,
            processed: false,
            error: Some(message),
        });
    }

    /// Record a non-fatal warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Set the end time and derive the skipped count.
    ///
    /// Safe to call more than once; the first end time wins.
    pub fn finalize(&mut self) {
        if self.end_time.is_none() {
            self.end_time = Some(Utc::now());
        }
        self.skipped_files = self.total_files.saturating_sub(self.processed_files);
    }

    /// Wall-clock duration of the run (zero until finalized)
    pub fn duration(&self) -> Duration {
        self.end_time
            .and_then(|end| (end - self.start_time).to_std().ok())
            .unwrap_or_default()
    }

    /// Whether the run finished without any per-file error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Read-only statistics about a candidate source vault
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultStats {
    pub markdown_files: usize,
    pub folders: usize,
    pub total_files: usize,
    /// Whether the vault-config marker directory exists at the root
    pub has_vault_config: bool,
}

/// Result of validating a candidate source vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultValidation {
    pub path: PathBuf,
    pub is_likely_valid: bool,
    pub stats: VaultStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_name_from_relative_path() {
        let entry = FileEntry::file("/vault/Projects/Web/notes.md", "Projects/Web/notes.md");
        assert_eq!(entry.name, "notes.md");
        assert!(entry.is_markdown());
        assert_eq!(entry.extension().as_deref(), Some("md"));

        let dir = FileEntry::directory("/vault/Projects", "Projects");
        assert_eq!(dir.name, "Projects");
        assert!(!dir.is_markdown());
    }

    #[test]
    fn test_extension_is_lowercased() {
        let entry = FileEntry::file("/vault/Diagram.PNG", "Diagram.PNG");
        assert_eq!(entry.extension().as_deref(), Some("png"));

        let bare = FileEntry::file("/vault/README", "README");
        assert_eq!(bare.extension(), None);
    }

    #[test]
    fn test_markdown_detection_is_case_sensitive() {
        assert!(!FileEntry::file("/v/a.MD", "a.MD").is_markdown());
    }

    #[test]
    fn test_finalize_derives_skipped() {
        let mut stats = RunStats::start();
        stats.total_files = 3;
        stats.record_processed("a.md", "a.md");
        stats.record_failure("b.md", None, "Failed to process b.md: boom");
        stats.finalize();

        assert_eq!(stats.processed_files, 1);
        assert_eq!(stats.skipped_files, 2);
        assert_eq!(
            stats.total_files,
            stats.processed_files + stats.skipped_files
        );
        assert!(stats.end_time.is_some());
        assert!(!stats.is_clean());
        assert_eq!(stats.outcomes.len(), 2);
    }

    #[test]
    fn test_finalize_keeps_first_end_time() {
        let mut stats = RunStats::start();
        stats.finalize();
        let first = stats.end_time;
        stats.finalize();
        assert_eq!(stats.end_time, first);
    }
}
