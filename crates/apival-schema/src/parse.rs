//! # Import Graph Walk
//!
//! Drives a [`Scanner`] over the root document and, depth-first, over every
//! document it imports. One `ParseSession` per call holds the set of
//! documents already scanned.
//!
//! Import paths are joined against the importing document's directory and
//! canonicalized, so `./a.api`, `a.api` and `sub/../a.api` are the same
//! document.

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::SchemaError;
use crate::model::{ImportWarning, Schema, WarningReason};
use crate::scanner::{Event, Scanner};

/// Parse `root` and every document reachable from it.
///
/// # Errors
///
/// [`SchemaError::RootUnreadable`] if the root document cannot be opened or
/// read. Problems with imported documents are reported in
/// [`Schema::warnings`] instead.
pub fn parse(root: impl AsRef<Path>) -> Result<Schema, SchemaError> {
    let root = root.as_ref();
    let unreadable = |source| SchemaError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    };

    let canonical = std::fs::canonicalize(root).map_err(unreadable)?;
    let mut session = ParseSession::default();
    session.visit(canonical).map_err(unreadable)?;

    let schema = session.finish();
    tracing::info!(
        records = schema.record_count(),
        documents = schema.document_count(),
        "found structures with validate tags"
    );
    Ok(schema)
}

/// Parse in-memory text as the root document.
///
/// `path_hint` names the document for diagnostics and is the base for
/// resolving its imports. It does not need to exist.
pub fn parse_source(path_hint: impl AsRef<Path>, text: &str) -> Schema {
    let path_hint = path_hint.as_ref();
    let path = std::fs::canonicalize(path_hint).unwrap_or_else(|_| path_hint.to_path_buf());

    let mut session = ParseSession::default();
    session.processed.insert(path.clone());
    session.documents.push(path.clone());
    session.scan(&path, text);
    session.finish()
}

/// Outcome of resolving an import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportTarget {
    /// Canonical path of an existing file.
    Found(PathBuf),
    /// The joined path, which does not exist.
    Missing(PathBuf),
}

/// Resolve `raw` as written in `importer`.
///
/// Absolute paths are used as-is, relative ones are joined against the
/// importer's directory.
pub fn resolve_import(raw: &str, importer: &Path) -> ImportTarget {
    let raw_path = Path::new(raw);
    let joined = if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        importer
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(raw_path)
    };

    match std::fs::canonicalize(&joined) {
        Ok(found) => ImportTarget::Found(found),
        Err(_) => ImportTarget::Missing(joined),
    }
}

/// State of one top-level parse.
#[derive(Debug, Default)]
struct ParseSession {
    processed: HashSet<PathBuf>,
    documents: Vec<PathBuf>,
    schema: Schema,
}

impl ParseSession {
    /// Read and scan `path` unless it was already visited.
    fn visit(&mut self, path: PathBuf) -> std::io::Result<()> {
        if !self.processed.insert(path.clone()) {
            tracing::debug!(path = %path.display(), "already parsed, skipping");
            return Ok(());
        }

        tracing::debug!(path = %path.display(), "parsing API file");
        let bytes = std::fs::read(&path)?;
        // Invalid bytes (legacy-encoded comments) become U+FFFD; a line is
        // lost only when that breaks its pattern.
        let text = String::from_utf8_lossy(&bytes);
        if matches!(text, Cow::Owned(_)) {
            tracing::debug!(path = %path.display(), "API file is not valid UTF-8, decoding lossily");
        }
        self.documents.push(path.clone());
        self.scan(&path, &text);
        Ok(())
    }

    fn scan(&mut self, path: &Path, text: &str) {
        let mut scanner = Scanner::new();
        for line in text.lines() {
            match scanner.feed(line) {
                Some(Event::Import(raw)) => self.follow_import(path, raw),
                Some(Event::Record(record)) => {
                    tracing::debug!(
                        record = %record.name,
                        fields = record.fields.len(),
                        path = %path.display(),
                        "collected record"
                    );
                    self.schema.records.push(record);
                }
                None => {}
            }
        }
        scanner.finish();
    }

    fn follow_import(&mut self, importer: &Path, raw: String) {
        match resolve_import(&raw, importer) {
            ImportTarget::Found(resolved) => {
                if let Err(e) = self.visit(resolved.clone()) {
                    self.warn(importer, raw, resolved, WarningReason::Unreadable(e.to_string()));
                }
            }
            ImportTarget::Missing(resolved) => {
                self.warn(importer, raw, resolved, WarningReason::NotFound);
            }
        }
    }

    fn warn(&mut self, importer: &Path, raw: String, resolved: PathBuf, reason: WarningReason) {
        let warning = ImportWarning {
            importer: importer.to_path_buf(),
            raw,
            resolved,
            reason,
        };
        tracing::warn!("{warning}");
        self.schema.warnings.push(warning);
    }

    fn finish(mut self) -> Schema {
        self.schema.documents = self.documents;
        self.schema
    }
}
