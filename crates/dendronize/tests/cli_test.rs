//! Subcommand handlers against temporary vaults

use dendronize::ImportArgs;
use dendronize::ValidateArgs;
use dendronize::commands::{self, EXIT_FATAL, EXIT_FILE_ERRORS};
use dendronize_core::ImportSettings;
use dendronize_export::ExportFormat;
use std::path::Path;
use std::process::ExitCode;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn test_import_and_save_defaults() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    let settings_path = config.path().join("settings.yml");
    write(source.path(), ".obsidian/app.json", "{}");
    write(source.path(), "Projects/Web/notes.md", "---\ntitle: X\n---\nSee [[Other Page]].");

    let args = ImportArgs {
        source: Some(source.path().to_path_buf()),
        target: Some(target.path().to_path_buf()),
        preserve_metadata: Some(false),
        excluded_names: vec!["build".to_string()],
        report: ExportFormat::Json,
        save_defaults: true,
        ..Default::default()
    };

    let code = commands::import(args, ImportSettings::default(), &settings_path)
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let note = std::fs::read_to_string(target.path().join("projects.web.notes.md")).unwrap();
    assert_eq!(note, "See [[other.page]].");

    let saved = ImportSettings::load(&settings_path).await.unwrap();
    assert_eq!(saved.default_import_path.as_deref(), Some(source.path()));
    assert_eq!(saved.default_target_path.as_deref(), Some(target.path()));
    assert!(!saved.options.preserve_metadata);
    assert!(saved.excluded_names.contains("build"));
}

#[tokio::test]
async fn test_import_uses_saved_paths() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write(source.path(), "a.md", "# A");

    let settings = ImportSettings {
        default_import_path: Some(source.path().to_path_buf()),
        default_target_path: Some(target.path().to_path_buf()),
        ..Default::default()
    };

    let code = commands::import(ImportArgs::default(), settings, Path::new("unused.yml"))
        .await
        .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(target.path().join("a.md").exists());
    assert!(!Path::new("unused.yml").exists());
}

#[tokio::test]
async fn test_empty_vault_exits_fatal() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();

    let args = ImportArgs {
        source: Some(source.path().to_path_buf()),
        target: Some(target.path().to_path_buf()),
        ..Default::default()
    };

    let code = commands::import(args, ImportSettings::default(), Path::new("unused.yml"))
        .await
        .unwrap();
    assert_eq!(code, ExitCode::from(EXIT_FATAL));
}

#[tokio::test]
async fn test_missing_source_is_an_error() {
    let temp = TempDir::new().unwrap();
    let args = ImportArgs {
        source: Some(temp.path().join("missing")),
        target: Some(temp.path().join("out")),
        ..Default::default()
    };

    let result = commands::import(args, ImportSettings::default(), Path::new("unused.yml")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_validate_exit_codes() {
    let vault = TempDir::new().unwrap();
    write(vault.path(), "Daily/today.md", "# Today");
    let empty = TempDir::new().unwrap();

    let ok = commands::validate(ValidateArgs {
        dir: vault.path().to_path_buf(),
        report: ExportFormat::Text,
    })
    .await
    .unwrap();
    assert_eq!(ok, ExitCode::SUCCESS);

    let not_vault = commands::validate(ValidateArgs {
        dir: empty.path().to_path_buf(),
        report: ExportFormat::Json,
    })
    .await
    .unwrap();
    assert_eq!(not_vault, ExitCode::from(EXIT_FILE_ERRORS));
}
