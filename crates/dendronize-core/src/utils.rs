//! Shared utilities for operations across dendronize crates.
//!
//! Provides DRY helpers for:
//! - Serialization with consistent error handling
//! - CSV building with field quoting

use crate::{Error, Result};

/// Generic JSON serialization with consistent error handling
/// Works with any type that implements Serialize (including slices)
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| {
        Error::parse_error(format!("Failed to serialize {} as JSON: {}", context, e))
    })
}

/// Generic CSV serialization builder
/// Use the CsvBuilder fluent API to construct and export CSV data
pub struct CsvBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of data from owned strings
    pub fn add_row(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Build the CSV string
    pub fn build(self) -> String {
        let mut csv = Self::line(&self.headers);
        for row in &self.rows {
            csv.push_str(&Self::line(row));
        }
        csv
    }

    fn line(values: &[String]) -> String {
        let mut line = values
            .iter()
            .map(|v| Self::escape(v))
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');
        line
    }

    fn escape(value: &str) -> String {
        if value.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", value.replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_to_json_string() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let json = to_json_string(&data, "test_data").unwrap();
        assert!(json.contains("test"));
        assert!(json.contains("42"));
    }

    #[test]
    fn test_csv_builder_quotes_when_needed() {
        let csv = CsvBuilder::new(&["file", "error"])
            .add_row(vec!["a.md".to_string(), "disk full, retry".to_string()])
            .add_row(vec!["b.md".to_string(), "said \"no\"".to_string()])
            .build();

        assert!(csv.starts_with("file,error\n"));
        assert!(csv.contains("a.md,\"disk full, retry\"\n"));
        assert!(csv.contains("b.md,\"said \"\"no\"\"\"\n"));
    }
}
