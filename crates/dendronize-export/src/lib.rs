//! # Report Export
//!
//! Renders import runs and vault analyses for people and for tools.
//!
//! ## Quick Start
//!
//! ```
//! use dendronize_core::RunStats;
//! use dendronize_export::{RunReport, RunReportExporter};
//!
//! # fn example() -> dendronize_core::Result<()> {
//! let mut stats = RunStats::start();
//! stats.total_files = 1;
//! stats.record_processed("notes.md", "notes.md");
//! stats.finalize();
//!
//! let report = RunReport::from_stats(&stats, "/obsidian", "/dendron");
//! println!("{}", RunReportExporter::to_text(&report));
//! let json = RunReportExporter::to_json(&report)?;
//! let csv = RunReportExporter::to_csv(&report);
//! # Ok(())
//! # }
//! ```
//!
//! ## Formats
//!
//! - **Text**: the completion summary followed by the error list
//! - **JSON**: the full report, pretty-printed
//! - **CSV**: one row per attempted file (source, target, status, error)
//!
//! Exporters return strings and never touch the file system.

use chrono::{DateTime, Utc};
use dendronize_core::prelude::*;
use dendronize_core::{CsvBuilder, to_json_string};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output format of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "unknown report format '{}' (expected text, json or csv)",
                other
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        })
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    Cancelled,
    Failed,
}

/// Exportable view of one import run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub source: String,
    pub target: String,
    pub status: RunStatus,
    /// Fatal error message, when the run failed
    pub failure: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_secs: f64,
    pub total_files: usize,
    pub processed_files: usize,
    pub skipped_files: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stubs_written: Vec<String>,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    /// Build a report for a run that returned its stats
    pub fn from_stats(stats: &RunStats, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        let status = if stats.cancelled {
            RunStatus::Cancelled
        } else {
            RunStatus::Completed
        };

        Self {
            run_id: stats.run_id.clone(),
            source: source.as_ref().display().to_string(),
            target: target.as_ref().display().to_string(),
            status,
            failure: None,
            start_time: stats.start_time,
            end_time: stats.end_time,
            duration_secs: stats.duration().as_secs_f64(),
            total_files: stats.total_files,
            processed_files: stats.processed_files,
            skipped_files: stats.skipped_files,
            errors: stats.errors.clone(),
            warnings: stats.warnings.clone(),
            stubs_written: stats.stubs_written.clone(),
            outcomes: stats.outcomes.clone(),
        }
    }

    /// Mark the run as failed with a fatal error
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.status = RunStatus::Failed;
        self.failure = Some(message.into());
        self
    }
}

/// One-line completion message, duration rounded to whole seconds
pub fn completion_message(report: &RunReport) -> String {
    format!(
        "Import completed! Processed {}/{} files in {}s",
        report.processed_files,
        report.total_files,
        report.duration_secs.round() as u64
    )
}

/// Run report exporter
pub struct RunReportExporter;

impl RunReportExporter {
    /// Human-readable summary
    pub fn to_text(report: &RunReport) -> String {
        let mut text = match report.status {
            RunStatus::Failed => format!(
                "Import failed: {}",
                report.failure.as_deref().unwrap_or("unknown error")
            ),
            RunStatus::Cancelled => format!(
                "Import cancelled. Processed {}/{} files",
                report.processed_files, report.total_files
            ),
            RunStatus::Completed => completion_message(report),
        };

        if !report.errors.is_empty() {
            text.push_str(&format!(". {} errors occurred.", report.errors.len()));
            text.push_str("\n\nImport Errors:\n");
            for error in &report.errors {
                text.push('\n');
                text.push_str(error);
            }
        }

        if !report.warnings.is_empty() {
            text.push_str("\n\nWarnings:\n");
            for warning in &report.warnings {
                text.push('\n');
                text.push_str(warning);
            }
        }

        if !report.stubs_written.is_empty() {
            text.push_str(&format!(
                "\n\nSchema files: {}",
                report.stubs_written.join(", ")
            ));
        }

        text
    }

    /// Export run report as JSON
    pub fn to_json(report: &RunReport) -> Result<String> {
        to_json_string(report, "run report")
    }

    /// Export per-file outcomes as CSV
    pub fn to_csv(report: &RunReport) -> String {
        report
            .outcomes
            .iter()
            .fold(
                CsvBuilder::new(&["source", "target", "status", "error"]),
                |csv, outcome| {
                    csv.add_row(vec![
                        outcome.source.clone(),
                        outcome.target.clone().unwrap_or_default(),
                        if outcome.processed { "processed" } else { "failed" }.to_string(),
                        outcome.error.clone().unwrap_or_default(),
                    ])
                },
            )
            .build()
    }

    pub fn export(report: &RunReport, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::to_text(report)),
            ExportFormat::Json => Self::to_json(report),
            ExportFormat::Csv => Ok(Self::to_csv(report)),
        }
    }
}

/// Vault analysis exporter
pub struct VaultReportExporter;

impl VaultReportExporter {
    pub fn to_text(validation: &VaultValidation) -> String {
        let stats = &validation.stats;
        format!(
            "Vault Analysis:\n\
             Path: {}\n\
             Markdown Files: {}\n\
             Folders: {}\n\
             Total Files: {}\n\
             Obsidian Config: {}\n\
             Looks like a vault: {}",
            validation.path.display(),
            stats.markdown_files,
            stats.folders,
            stats.total_files,
            if stats.has_vault_config { "Found" } else { "Not found" },
            if validation.is_likely_valid { "yes" } else { "no" }
        )
    }

    pub fn to_json(validation: &VaultValidation) -> Result<String> {
        to_json_string(validation, "vault analysis")
    }

    /// Single-row CSV
    pub fn to_csv(validation: &VaultValidation) -> String {
        let stats = &validation.stats;
        CsvBuilder::new(&[
            "path",
            "is_likely_valid",
            "markdown_files",
            "folders",
            "total_files",
            "has_vault_config",
        ])
        .add_row(vec![
            validation.path.display().to_string(),
            validation.is_likely_valid.to_string(),
            stats.markdown_files.to_string(),
            stats.folders.to_string(),
            stats.total_files.to_string(),
            stats.has_vault_config.to_string(),
        ])
        .build()
    }

    pub fn export(validation: &VaultValidation, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Text => Ok(Self::to_text(validation)),
            ExportFormat::Json => Self::to_json(validation),
            ExportFormat::Csv => Ok(Self::to_csv(validation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn finished_stats() -> RunStats {
        let mut stats = RunStats::start();
        stats.total_files = 3;
        stats.record_processed("Projects/Web/notes.md", "projects.web.notes.md");
        stats.record_processed("img/a.png", "assets/img/a.png");
        stats.record_failure(
            "b.md",
            Some("b.md".to_string()),
            "Failed to process b.md: disk full, retry",
        );
        stats.finalize();
        stats
    }

    #[test]
    fn test_completion_text_lists_errors() {
        let report = RunReport::from_stats(&finished_stats(), "/src", "/dst");
        let text = RunReportExporter::to_text(&report);

        assert!(text.starts_with("Import completed! Processed 2/3 files in 0s. 1 errors occurred."));
        assert!(text.contains("Import Errors:\n\nFailed to process b.md: disk full, retry"));
    }

    #[test]
    fn test_clean_run_text() {
        let mut stats = RunStats::start();
        stats.total_files = 1;
        stats.record_processed("a.md", "a.md");
        stats.finalize();

        let text = RunReportExporter::to_text(&RunReport::from_stats(&stats, "/s", "/t"));
        assert_eq!(text, "Import completed! Processed 1/1 files in 0s");
    }

    #[test]
    fn test_cancelled_and_failed_status() {
        let mut stats = finished_stats();
        stats.cancelled = true;
        let report = RunReport::from_stats(&stats, "/s", "/t");
        assert_eq!(report.status, RunStatus::Cancelled);
        assert!(RunReportExporter::to_text(&report).starts_with("Import cancelled."));

        let failed = report.with_failure("No files found to import in /s");
        assert_eq!(failed.status, RunStatus::Failed);
        assert!(
            RunReportExporter::to_text(&failed)
                .starts_with("Import failed: No files found to import in /s")
        );
    }

    #[test]
    fn test_run_json() {
        let report = RunReport::from_stats(&finished_stats(), "/src", "/dst");
        let json = RunReportExporter::export(&report, ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "completed");
        assert_eq!(value["processed_files"], 2);
        assert_eq!(value["skipped_files"], 1);
        assert_eq!(value["outcomes"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_run_csv_rows() {
        let report = RunReport::from_stats(&finished_stats(), "/src", "/dst");
        let csv = RunReportExporter::to_csv(&report);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "source,target,status,error");
        assert_eq!(lines[1], "Projects/Web/notes.md,projects.web.notes.md,processed,");
        assert_eq!(
            lines[3],
            "b.md,b.md,failed,\"Failed to process b.md: disk full, retry\""
        );
    }

    #[test]
    fn test_vault_analysis_text() {
        let validation = VaultValidation {
            path: PathBuf::from("/vault"),
            is_likely_valid: true,
            stats: VaultStats {
                markdown_files: 12,
                folders: 3,
                total_files: 20,
                has_vault_config: false,
            },
        };

        let text = VaultReportExporter::to_text(&validation);
        assert!(text.starts_with("Vault Analysis:\nPath: /vault\nMarkdown Files: 12\n"));
        assert!(text.contains("Folders: 3\nTotal Files: 20\nObsidian Config: Not found"));

        let csv = VaultReportExporter::to_csv(&validation);
        assert!(csv.ends_with("/vault,true,12,3,20,false\n"));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::default().to_string(), "text");
    }
}
