//! Progress events emitted by an import run.
//!
//! The orchestrator never talks to a UI directly. It hands a
//! [`ProgressEvent`] to whatever [`ProgressReporter`] the caller supplied:
//! nothing ([`NoopReporter`]), the `log` facade ([`LogReporter`]), or a tokio
//! channel the caller drains at its own pace.

use serde::Serialize;
use std::path::PathBuf;
use tokio::sync::mpsc::UnboundedSender;

/// Stage of an import run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Scanning,
    ConvertingMarkdown,
    ConvertingAssets,
    WritingStubs,
    Finalizing,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Scanning => "Scanning source files",
            Phase::ConvertingMarkdown => "Converting notes",
            Phase::ConvertingAssets => "Processing assets",
            Phase::WritingStubs => "Creating schema files",
            Phase::Finalizing => "Finalizing",
        };
        f.write_str(label)
    }
}

/// One observable step of an import run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ProgressEvent {
    PhaseStarted {
        phase: Phase,
    },
    ScanStarted {
        root: PathBuf,
    },
    ScanFinished {
        markdown_files: usize,
        asset_files: usize,
        warnings: usize,
    },
    /// `index` is 1-based across all Markdown and asset files of the run
    FileStarted {
        relative_path: String,
        index: usize,
        total: usize,
    },
    FileFinished {
        relative_path: String,
        success: bool,
    },
    StubWritten {
        file_name: String,
    },
    /// Emitted once, when the first cancellation check observes the request
    Cancelled,
    Completed {
        processed_files: usize,
        total_files: usize,
        errors: usize,
    },
}

/// Sink for progress events.
///
/// Called synchronously from the run's control flow; implementations must
/// not block.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {}
}

/// Forwards events to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::PhaseStarted { phase } => log::info!("{}...", phase),
            ProgressEvent::ScanStarted { root } => log::debug!("Scanning {}", root.display()),
            ProgressEvent::ScanFinished {
                markdown_files,
                asset_files,
                warnings,
            } => log::info!(
                "Found {} files to process ({} notes, {} assets, {} warnings)",
                markdown_files + asset_files,
                markdown_files,
                asset_files,
                warnings
            ),
            ProgressEvent::FileStarted {
                relative_path,
                index,
                total,
            } => log::debug!("[{}/{}] Processing {}", index, total, relative_path),
            ProgressEvent::FileFinished {
                relative_path,
                success: false,
            } => log::debug!("Failed {}", relative_path),
            ProgressEvent::FileFinished { .. } => {}
            ProgressEvent::StubWritten { file_name } => log::debug!("Wrote {}", file_name),
            ProgressEvent::Cancelled => log::info!("Import cancelled"),
            ProgressEvent::Completed {
                processed_files,
                total_files,
                errors,
            } => log::info!(
                "Import finished: {}/{} files, {} errors",
                processed_files,
                total_files,
                errors
            ),
        }
    }
}

/// Send events to a channel; a closed receiver silently drops them
impl ProgressReporter for UnboundedSender<ProgressEvent> {
    fn report(&self, event: ProgressEvent) {
        let _ = self.send(event);
    }
}
