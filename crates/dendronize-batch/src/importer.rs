//! The import run state machine.
//!
//! `Scanning -> (nothing to import: failed) -> Converting Markdown ->
//! Converting Assets -> Writing Stubs -> Finalizing`
//!
//! Files are processed strictly one after another in scan order. Per-file
//! failures are recorded in [`RunStats`] and the run moves on; only a root
//! scan failure or an empty source aborts it. Finalization runs on every
//! path out, including cancellation and fatal failure.

use crate::progress::{NoopReporter, Phase, ProgressEvent, ProgressReporter};
use crate::stubs::{StubWriter, collect_hierarchies};
use dendronize_core::{Error, FileEntry, Result, RunStats, TransformOptions};
use dendronize_transform::{target_file_name, transform_note};
use dendronize_vault::{AssetRelocator, TreeScanner, asset_target, is_asset, write_atomic};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error as ThisError;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// A run that stopped on a fatal error.
///
/// `stats` is finalized: end time set and skipped count derived.
#[derive(Debug, ThisError)]
#[error("Import failed")]
pub struct RunFailure {
    #[source]
    pub error: Error,
    pub stats: RunStats,
}

/// Configured import of one source vault into one target directory
#[derive(Clone)]
pub struct VaultImporter {
    source: PathBuf,
    target: PathBuf,
    options: TransformOptions,
    excluded: BTreeSet<String>,
    cancel: CancellationToken,
    progress: Arc<dyn ProgressReporter>,
}

impl std::fmt::Debug for VaultImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultImporter")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("options", &self.options)
            .field("excluded", &self.excluded)
            .finish_non_exhaustive()
    }
}

impl VaultImporter {
    /// Import `source` into `target` with default options
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            options: TransformOptions::default(),
            excluded: BTreeSet::new(),
            cancel: CancellationToken::new(),
            progress: Arc::new(NoopReporter),
        }
    }

    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Skip these entry names in addition to the scanner's defaults
    pub fn exclude_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(names.into_iter().map(Into::into));
        self
    }

    /// Use a caller-owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_progress(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.progress = Arc::new(reporter);
        self
    }

    /// Token that cancels this importer's runs
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Execute one run
    #[instrument(skip(self), fields(source = ?self.source, target = ?self.target), name = "vault_import")]
    pub async fn run(&self) -> std::result::Result<RunStats, RunFailure> {
        let mut run = ImportRun {
            source: &self.source,
            target: &self.target,
            options: &self.options,
            cancel: &self.cancel,
            progress: self.progress.as_ref(),
            stats: RunStats::start(),
        };

        log::info!(
            "Starting import {} from {} to {}",
            run.stats.run_id,
            self.source.display(),
            self.target.display()
        );

        let outcome = run.execute(&self.excluded).await;
        run.finish(outcome)
    }
}

/// Convert the vault at `source` into `target`.
///
/// Checks `cancel` before every file. Per-file errors land in the returned
/// stats; a root scan failure or an empty source is returned as
/// [`RunFailure`].
pub async fn transform_vault(
    source: &Path,
    target: &Path,
    options: &TransformOptions,
    cancel: &CancellationToken,
    progress: &dyn ProgressReporter,
) -> std::result::Result<RunStats, RunFailure> {
    let mut run = ImportRun {
        source,
        target,
        options,
        cancel,
        progress,
        stats: RunStats::start(),
    };
    let outcome = run.execute(&BTreeSet::new()).await;
    run.finish(outcome)
}

/// Mutable state of one run, owned by its control flow
struct ImportRun<'a> {
    source: &'a Path,
    target: &'a Path,
    options: &'a TransformOptions,
    cancel: &'a CancellationToken,
    progress: &'a dyn ProgressReporter,
    stats: RunStats,
}

impl ImportRun<'_> {
    async fn execute(&mut self, excluded: &BTreeSet<String>) -> Result<()> {
        self.progress.report(ProgressEvent::PhaseStarted {
            phase: Phase::Scanning,
        });
        self.progress.report(ProgressEvent::ScanStarted {
            root: self.source.to_path_buf(),
        });

        let report = TreeScanner::new(self.source)
            .exclude_all(excluded.iter().cloned())
            .scan()
            .await?;

        for warning in &report.warnings {
            self.stats.warn(warning.clone());
        }

        let markdown = report.markdown_files();
        let assets: Vec<&FileEntry> = if self.options.handle_assets {
            report.files().filter(|e| is_asset(e)).collect()
        } else {
            Vec::new()
        };

        self.stats.total_files = markdown.len() + assets.len();
        self.progress.report(ProgressEvent::ScanFinished {
            markdown_files: markdown.len(),
            asset_files: assets.len(),
            warnings: report.warnings.len(),
        });

        if self.stats.total_files == 0 {
            return Err(Error::nothing_to_import(self.source));
        }

        let written = self.convert_markdown(&markdown).await;

        if !assets.is_empty() {
            self.convert_assets(&assets, markdown.len()).await;
        }

        if self.options.create_hierarchy_stubs {
            self.write_stubs(written.iter().map(String::as_str)).await;
        }

        Ok(())
    }

    /// Convert every note, returning the relative paths written
    async fn convert_markdown(&mut self, notes: &[&FileEntry]) -> Vec<String> {
        self.progress.report(ProgressEvent::PhaseStarted {
            phase: Phase::ConvertingMarkdown,
        });

        let mut written = Vec::new();
        let mut targets: HashMap<String, String> = HashMap::new();

        for (index, note) in notes.iter().enumerate() {
            if self.cancellation_requested() {
                break;
            }
            self.file_started(note, index + 1);

            let file_name = target_file_name(&note.relative_path, &note.name, self.options);
            match self.convert_note(note, &file_name).await {
                Ok(lossy) => {
                    if lossy {
                        let message = format!(
                            "{} is not valid UTF-8; invalid bytes were replaced",
                            note.relative_path
                        );
                        log::warn!("{}", message);
                        self.stats.warn(message);
                    }
                    if let Some(previous) = targets.insert(file_name.clone(), note.relative_path.clone()) {
                        let message = format!(
                            "{} overwrote {} (both map to {})",
                            note.relative_path, previous, file_name
                        );
                        log::warn!("{}", message);
                        self.stats.warn(message);
                    }
                    self.stats.record_processed(&note.relative_path, &file_name);
                    written.push(note.relative_path.clone());
                    self.file_finished(note, true);
                }
                Err(e) => {
                    let message = format!("Failed to process {}: {}", note.relative_path, e);
                    log::error!("{}", message);
                    self.stats
                        .record_failure(&note.relative_path, Some(file_name), message);
                    self.file_finished(note, false);
                }
            }
        }

        written
    }

    /// Returns whether the note had to be decoded lossily
    async fn convert_note(&self, note: &FileEntry, file_name: &str) -> Result<bool> {
        let bytes = tokio::fs::read(&note.path).await?;
        let text = String::from_utf8_lossy(&bytes);
        let lossy = matches!(text, Cow::Owned(_));
        let content = transform_note(&text, self.options);
        write_atomic(&self.target.join(file_name), content).await?;
        Ok(lossy)
    }

    async fn convert_assets(&mut self, assets: &[&FileEntry], offset: usize) {
        self.progress.report(ProgressEvent::PhaseStarted {
            phase: Phase::ConvertingAssets,
        });

        let relocator = AssetRelocator::new(self.target);
        for (index, asset) in assets.iter().enumerate() {
            if self.cancellation_requested() {
                break;
            }
            self.file_started(asset, offset + index + 1);

            match relocator.relocate(asset).await {
                Ok(target) => {
                    self.stats.record_processed(&asset.relative_path, target);
                    self.file_finished(asset, true);
                }
                Err(e) => {
                    let message = format!("Failed to process asset {}: {}", asset.relative_path, e);
                    log::error!("{}", message);
                    self.stats
                        .record_failure(&asset.relative_path, Some(asset_target(asset)), message);
                    self.file_finished(asset, false);
                }
            }
        }
    }

    /// Stubs are not content files and never count towards processed files
    async fn write_stubs<'p>(&mut self, written: impl Iterator<Item = &'p str>) {
        self.progress.report(ProgressEvent::PhaseStarted {
            phase: Phase::WritingStubs,
        });

        let writer = StubWriter::new(self.target);
        for identifier in collect_hierarchies(written) {
            if self.cancellation_requested() {
                break;
            }

            match writer.write_stub(&identifier).await {
                Ok(file_name) => {
                    self.progress.report(ProgressEvent::StubWritten {
                        file_name: file_name.clone(),
                    });
                    self.stats.stubs_written.push(file_name);
                }
                Err(e) => {
                    let message = format!(
                        "Failed to write schema {}: {}",
                        crate::stubs::schema_file_name(&identifier),
                        e
                    );
                    log::error!("{}", message);
                    self.stats.errors.push(message);
                }
            }
        }
    }

    fn cancellation_requested(&mut self) -> bool {
        if !self.cancel.is_cancelled() {
            return false;
        }
        if !self.stats.cancelled {
            self.stats.cancelled = true;
            log::info!(
                "Cancellation requested after {} of {} files",
                self.stats.processed_files,
                self.stats.total_files
            );
            self.progress.report(ProgressEvent::Cancelled);
        }
        true
    }

    fn file_started(&self, entry: &FileEntry, index: usize) {
        self.progress.report(ProgressEvent::FileStarted {
            relative_path: entry.relative_path.clone(),
            index,
            total: self.stats.total_files,
        });
    }

    fn file_finished(&self, entry: &FileEntry, success: bool) {
        self.progress.report(ProgressEvent::FileFinished {
            relative_path: entry.relative_path.clone(),
            success,
        });
    }

    fn finish(mut self, outcome: Result<()>) -> std::result::Result<RunStats, RunFailure> {
        self.progress.report(ProgressEvent::PhaseStarted {
            phase: Phase::Finalizing,
        });
        self.stats.finalize();

        match outcome {
            Ok(()) => {
                log::info!(
                    "Import completed! Processed {}/{} files in {:.1}s",
                    self.stats.processed_files,
                    self.stats.total_files,
                    self.stats.duration().as_secs_f64()
                );
                self.progress.report(ProgressEvent::Completed {
                    processed_files: self.stats.processed_files,
                    total_files: self.stats.total_files,
                    errors: self.stats.errors.len(),
                });
                Ok(self.stats)
            }
            Err(error) => {
                log::error!("Import failed: {}", error);
                Err(RunFailure {
                    error,
                    stats: self.stats,
                })
            }
        }
    }
}
