//! Integration tests for the vault heuristics

use dendronize_vault::{
    analyze_vault, has_markdown_within_depth, has_vault_config, validate_source_vault,
    validate_vault,
};
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "content").unwrap();
}

#[test]
fn test_config_marker_alone_is_enough() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join(".obsidian")).unwrap();

    let validation = validate_vault(temp.path()).unwrap();
    assert!(validation.is_likely_valid);
    assert!(validation.stats.has_vault_config);
    assert_eq!(validation.stats.markdown_files, 0);
}

#[test]
fn test_config_marker_must_be_directory() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".obsidian");
    assert!(!has_vault_config(temp.path()));
}

#[test]
fn test_markdown_depth_bound() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "one/two/note.md");
    assert!(has_markdown_within_depth(temp.path(), 2));

    let deep = TempDir::new().unwrap();
    write(deep.path(), "one/two/three/note.md");
    assert!(!has_markdown_within_depth(deep.path(), 2));
    assert!(!validate_vault(deep.path()).unwrap().is_likely_valid);
    // Deep notes still count in the informational statistics
    assert_eq!(analyze_vault(deep.path()).markdown_files, 1);
}

#[test]
fn test_markdown_in_hidden_directory_ignored() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), ".trash/note.md");
    assert!(!has_markdown_within_depth(temp.path(), 2));
}

#[test]
fn test_statistics_skip_hidden_entries() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "a.md");
    write(temp.path(), "Projects/b.md");
    write(temp.path(), "Projects/img.png");
    write(temp.path(), "Projects/Deep/c.md");
    write(temp.path(), ".obsidian/workspace.json");
    write(temp.path(), ".hidden.md");

    let stats = analyze_vault(temp.path());
    assert_eq!(stats.markdown_files, 3);
    assert_eq!(stats.total_files, 4);
    assert_eq!(stats.folders, 2);
    assert!(stats.has_vault_config);
}

#[test]
fn test_not_a_directory() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "file.md");
    assert!(validate_vault(&temp.path().join("file.md")).is_err());
    assert!(validate_vault(&temp.path().join("missing")).is_err());
}

#[tokio::test]
async fn test_async_validation() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "Notes/today.md");

    let validation = validate_source_vault(temp.path()).await.unwrap();
    assert!(validation.is_likely_valid);
    assert!(!validation.stats.has_vault_config);
    assert_eq!(validation.path, temp.path());
}

#[test]
fn test_empty_directory_is_not_a_vault() {
    let temp = TempDir::new().unwrap();
    let validation = validate_vault(temp.path()).unwrap();
    assert!(!validation.is_likely_valid);
    assert_eq!(validation.stats.total_files, 0);
}
