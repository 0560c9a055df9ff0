//! Configuration types for an import run.
//!
//! [`TransformOptions`] is supplied once per run and never changes during it.
//! [`ImportSettings`] is the persisted preference file owned by the outer
//! layer (CLI); the engine itself only ever sees plain parameters.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Entry names the scanner always skips, besides hidden entries
pub const DEFAULT_EXCLUDED_NAMES: &[&str] = &["node_modules"];

/// Per-run switches controlling what the transformation does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Flatten folder nesting into dot-delimited file names
    pub convert_hierarchy: bool,
    /// Keep the leading `---` metadata block of each note
    pub preserve_metadata: bool,
    /// Rewrite `[[...]]` links
    pub convert_wiki_links: bool,
    /// Emit one `<hierarchy>.schema.yml` stub per distinct parent hierarchy
    pub create_hierarchy_stubs: bool,
    /// Copy non-Markdown assets into `assets/`
    pub handle_assets: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            convert_hierarchy: true,
            preserve_metadata: true,
            convert_wiki_links: true,
            create_hierarchy_stubs: false,
            handle_assets: true,
        }
    }
}

impl TransformOptions {
    /// Create options with the default switches
    pub fn new() -> Self {
        Self::default()
    }

    /// Set convert_hierarchy
    pub fn convert_hierarchy(mut self, enabled: bool) -> Self {
        self.convert_hierarchy = enabled;
        self
    }

    /// Set preserve_metadata
    pub fn preserve_metadata(mut self, enabled: bool) -> Self {
        self.preserve_metadata = enabled;
        self
    }

    /// Set convert_wiki_links
    pub fn convert_wiki_links(mut self, enabled: bool) -> Self {
        self.convert_wiki_links = enabled;
        self
    }

    /// Set create_hierarchy_stubs
    pub fn create_hierarchy_stubs(mut self, enabled: bool) -> Self {
        self.create_hierarchy_stubs = enabled;
        self
    }

    /// Set handle_assets
    pub fn handle_assets(mut self, enabled: bool) -> Self {
        self.handle_assets = enabled;
        self
    }
}

/// Persisted importer preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Source vault used when none is given explicitly
    pub default_import_path: Option<PathBuf>,
    /// Target vault used when none is given explicitly
    pub default_target_path: Option<PathBuf>,
    pub options: TransformOptions,
    /// Extra entry names to skip while scanning
    pub excluded_names: BTreeSet<String>,
    pub log_level: String,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            default_import_path: None,
            default_target_path: None,
            options: TransformOptions::default(),
            excluded_names: BTreeSet::new(),
            log_level: "info".to_string(),
        }
    }
}

impl ImportSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        for name in &self.excluded_names {
            if name.is_empty() || name.contains('/') || name.contains('\\') {
                return Err(Error::config_error(format!(
                    "Excluded name must be a single path component: {:?}",
                    name
                )));
            }
        }

        match self.log_level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => Err(Error::config_error(format!("Unknown log level: {}", other))),
        }
    }

    /// Validate, then save settings as YAML, creating parent directories as needed
    pub async fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize settings: {}", e)))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::config_error(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save settings to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load settings from a YAML file; a missing file yields defaults
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load settings from {}: {}",
                path.display(),
                e
            ))
        })?;

        let settings: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid settings file: {}", e)))?;
        settings.validate()?;

        Ok(settings)
    }

    /// Default excluded names merged with the configured extras
    pub fn all_excluded_names(&self) -> BTreeSet<String> {
        DEFAULT_EXCLUDED_NAMES
            .iter()
            .map(|s| s.to_string())
            .chain(self.excluded_names.iter().cloned())
            .collect()
    }
}
