//! # Schema Model
//!
//! Descriptors produced by the scanner. Order is always source order:
//! records in the order their closing brace was reached (imports first,
//! depth-first), fields in declaration order.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A struct field that carries a `validate` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Go field name, e.g. `Username`.
    pub name: String,
    /// Declared type token as written (`string`, `*int64`, `[]string`).
    /// Never interpreted.
    #[serde(rename = "type")]
    pub ty: String,
    /// Payload of `validate:"..."`. Never empty.
    pub rule: String,
    /// Payload of `json:"..."`, if the tag is present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<String>,
}

/// A record (Go struct) with at least one validated field once closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// A record qualifies for code generation when any field has a rule.
    pub fn is_qualifying(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Why an import was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum WarningReason {
    /// The resolved path does not exist.
    NotFound,
    /// The file exists but could not be read.
    Unreadable(String),
}

/// A skipped import. Recorded, logged, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportWarning {
    /// Document containing the import statement.
    pub importer: PathBuf,
    /// Path exactly as quoted in the import statement.
    pub raw: String,
    /// `raw` joined against the importer's directory.
    pub resolved: PathBuf,
    pub reason: WarningReason,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            WarningReason::NotFound => write!(
                f,
                "imported API file not found: {} (imported as \"{}\" from {})",
                self.resolved.display(),
                self.raw,
                self.importer.display(),
            ),
            WarningReason::Unreadable(reason) => write!(
                f,
                "failed to parse imported file {}: {reason}",
                self.resolved.display(),
            ),
        }
    }
}

/// Result of one top-level parse.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Schema {
    /// Qualifying records in source order.
    pub records: Vec<Record>,
    /// Every document scanned, in visit order. The root comes first.
    pub documents: Vec<PathBuf>,
    /// Imports that were skipped.
    pub warnings: Vec<ImportWarning>,
}

impl Schema {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by name. Returns the first match.
    pub fn record(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }
}
