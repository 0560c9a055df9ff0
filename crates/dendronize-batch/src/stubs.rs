//! Hierarchy stub (schema) files.
//!
//! One `<identifier>.schema.yml` per distinct parent hierarchy of the
//! imported notes, declaring the node and a catch-all child template.

use dendronize_core::{Error, Result};
use dendronize_transform::extract_parent_hierarchy;
use dendronize_vault::write_atomic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Suffix appended to a hierarchy identifier to name its stub file
pub const SCHEMA_SUFFIX: &str = ".schema.yml";

/// Top-level schema descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub version: u32,
    pub imports: Vec<String>,
    pub schemas: Vec<SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub id: String,
    pub children: Vec<SchemaChild>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaChild {
    pub pattern: String,
    pub template: SchemaTemplate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTemplate {
    pub id: String,
    pub title: String,
}

impl SchemaDocument {
    /// The fixed stub template for one hierarchy node
    pub fn for_hierarchy(identifier: &str) -> Self {
        Self {
            version: 1,
            imports: Vec::new(),
            schemas: vec![SchemaNode {
                id: identifier.to_string(),
                children: vec![SchemaChild {
                    pattern: "*".to_string(),
                    template: SchemaTemplate {
                        id: "{{fname}}".to_string(),
                        title: "{{title}}".to_string(),
                    },
                }],
            }],
        }
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::parse_error(format!("Failed to serialize schema: {}", e)))
    }
}

/// Stub file name for a hierarchy identifier
pub fn schema_file_name(identifier: &str) -> String {
    format!("{}{}", identifier, SCHEMA_SUFFIX)
}

/// Distinct parent hierarchies of the given note paths, sorted
pub fn collect_hierarchies<'a, I>(relative_paths: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    relative_paths
        .into_iter()
        .filter_map(extract_parent_hierarchy)
        .collect()
}

/// Writes stub files at the target root
#[derive(Debug, Clone)]
pub struct StubWriter {
    target_root: PathBuf,
}

impl StubWriter {
    pub fn new(target_root: impl Into<PathBuf>) -> Self {
        Self {
            target_root: target_root.into(),
        }
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    /// Write the stub for `identifier`, returning its file name
    pub async fn write_stub(&self, identifier: &str) -> Result<String> {
        let file_name = schema_file_name(identifier);
        let body = SchemaDocument::for_hierarchy(identifier).to_yaml()?;
        write_atomic(&self.target_root.join(&file_name), body).await?;
        log::debug!("Wrote schema {}", file_name);
        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_deduplicates_and_skips_root_notes() {
        let hierarchies = collect_hierarchies([
            "Projects/Web/a.md",
            "Projects/Web/b.md",
            "readme.md",
            "Areas/Health.md",
        ]);
        let expected: Vec<&str> = vec!["areas", "projects.web"];
        assert_eq!(hierarchies.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_schema_file_name() {
        assert_eq!(schema_file_name("projects.web"), "projects.web.schema.yml");
    }

    #[test]
    fn test_schema_yaml_shape() {
        let yaml = SchemaDocument::for_hierarchy("projects.web").to_yaml().unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(value["version"].as_u64(), Some(1));
        assert!(value["imports"].as_sequence().unwrap().is_empty());
        let node = &value["schemas"][0];
        assert_eq!(node["id"].as_str(), Some("projects.web"));
        assert_eq!(node["children"][0]["pattern"].as_str(), Some("*"));
        assert_eq!(
            node["children"][0]["template"]["id"].as_str(),
            Some("{{fname}}")
        );
        assert_eq!(
            node["children"][0]["template"]["title"].as_str(),
            Some("{{title}}")
        );
    }

    #[test]
    fn test_schema_round_trip() {
        let doc = SchemaDocument::for_hierarchy("areas");
        let parsed: SchemaDocument = serde_yaml::from_str(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, doc);
    }
}
