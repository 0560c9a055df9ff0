//! Subcommand handlers

use crate::cli::{ImportArgs, ValidateArgs};
use anyhow::{Context, bail};
use dendronize_batch::{CancellationToken, LogReporter, VaultImporter};
use dendronize_core::ImportSettings;
use dendronize_export::{RunReport, RunReportExporter, VaultReportExporter};
use dendronize_vault::validate_source_vault;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Exit code when some files failed but the run finished
pub const EXIT_FILE_ERRORS: u8 = 1;
/// Exit code when the run failed as a whole
pub const EXIT_FATAL: u8 = 2;
/// Exit code after Ctrl-C
pub const EXIT_CANCELLED: u8 = 130;

/// Source and target for an import: explicit arguments, then saved defaults
pub fn resolve_paths(
    args: &ImportArgs,
    settings: &ImportSettings,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let source = args
        .source
        .clone()
        .or_else(|| settings.default_import_path.clone())
        .context("No source vault given: pass --source or save a default import path")?;
    let target = args
        .target
        .clone()
        .or_else(|| settings.default_target_path.clone())
        .context("No target directory given: pass --target or save a default target path")?;

    if source == target {
        bail!("Source and target must differ: {}", source.display());
    }
    Ok((source, target))
}

pub async fn import(
    args: ImportArgs,
    settings: ImportSettings,
    settings_path: &Path,
) -> anyhow::Result<ExitCode> {
    let (source, target) = resolve_paths(&args, &settings)?;
    let options = args.merge_options(settings.options);

    let validation = validate_source_vault(&source)
        .await
        .with_context(|| format!("Cannot import from {}", source.display()))?;
    if !validation.is_likely_valid {
        log::warn!(
            "{} has no .obsidian directory and no notes near its root; importing anyway",
            source.display()
        );
    }

    let mut excluded = settings.excluded_names.clone();
    excluded.extend(args.excluded_names.iter().cloned());

    let token = CancellationToken::new();
    let importer = VaultImporter::new(&source, &target)
        .with_options(options)
        .exclude_all(excluded.iter().cloned())
        .with_cancellation(token.clone())
        .with_progress(LogReporter);

    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, finishing the current file");
            token.cancel();
        }
    });
    let outcome = importer.run().await;
    signal_task.abort();

    let (report, code) = match outcome {
        Ok(stats) => {
            let code = if stats.cancelled {
                EXIT_CANCELLED
            } else if stats.is_clean() {
                0
            } else {
                EXIT_FILE_ERRORS
            };
            (RunReport::from_stats(&stats, &source, &target), code)
        }
        Err(failure) => (
            RunReport::from_stats(&failure.stats, &source, &target)
                .with_failure(failure.error.to_string()),
            EXIT_FATAL,
        ),
    };

    println!("{}", RunReportExporter::export(&report, args.report)?);

    if args.save_defaults {
        let updated = ImportSettings {
            default_import_path: Some(source),
            default_target_path: Some(target),
            options,
            excluded_names: excluded,
            ..settings
        };
        updated
            .save(settings_path)
            .await
            .with_context(|| format!("Failed to save defaults to {}", settings_path.display()))?;
        log::info!("Saved defaults to {}", settings_path.display());
    }

    Ok(ExitCode::from(code))
}

pub async fn validate(args: ValidateArgs) -> anyhow::Result<ExitCode> {
    let validation = validate_source_vault(&args.dir).await?;
    println!("{}", VaultReportExporter::export(&validation, args.report)?);

    Ok(if validation.is_likely_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FILE_ERRORS)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths_win() {
        let args = ImportArgs {
            source: Some(PathBuf::from("/a")),
            ..Default::default()
        };
        let settings = ImportSettings {
            default_import_path: Some(PathBuf::from("/saved-src")),
            default_target_path: Some(PathBuf::from("/saved-dst")),
            ..Default::default()
        };

        let (source, target) = resolve_paths(&args, &settings).unwrap();
        assert_eq!(source, PathBuf::from("/a"));
        assert_eq!(target, PathBuf::from("/saved-dst"));
    }

    #[test]
    fn test_missing_paths_rejected() {
        let err = resolve_paths(&ImportArgs::default(), &ImportSettings::default()).unwrap_err();
        assert!(err.to_string().contains("--source"));
    }

    #[test]
    fn test_same_source_and_target_rejected() {
        let args = ImportArgs {
            source: Some(PathBuf::from("/v")),
            target: Some(PathBuf::from("/v")),
            ..Default::default()
        };
        assert!(resolve_paths(&args, &ImportSettings::default()).is_err());
    }
}
