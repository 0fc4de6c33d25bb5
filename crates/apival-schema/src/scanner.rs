//! # Line Scanner
//!
//! A finite-state scanner over the trimmed lines of one `.api` document.
//!
//! ## States
//!
//! - outside any block
//! - inside `import ( ... )`
//! - inside `type ( ... )`
//! - inside a record body, with a signed brace depth
//!
//! The scanner does no I/O. Import statements are handed back as
//! [`Event::Import`] so the caller can descend into the imported document
//! before feeding the next line, which keeps records in depth-first order.
//!
//! ## Tolerance
//!
//! Every pattern is matched per line. A line that matches nothing is
//! ignored and never changes state, except through its brace balance while
//! a record is open.

use lazy_static::lazy_static;
use regex::Regex;

use crate::model::{Field, Record};

lazy_static! {
    /// `Name {` anywhere on the line.
    static ref RECORD_NAME: Regex = Regex::new(r"(\w+)\s*\{").unwrap();
    /// `Name Type `tags`` with pointer/slice prefixes on the type.
    static ref FIELD: Regex = Regex::new(r"(\w+)\s+([*\[\]]*\w+)\s*`([^`]*)`").unwrap();
    static ref VALIDATE_TAG: Regex = Regex::new(r#"validate:"([^"]*)""#).unwrap();
    static ref JSON_TAG: Regex = Regex::new(r#"json:"([^"]*)""#).unwrap();
    /// `import "path.api"` on a single line.
    static ref SINGLE_IMPORT: Regex = Regex::new(r#"import\s+"([^"]+\.api)""#).unwrap();
    /// A bare quoted `.api` path, as found inside `import ( ... )`.
    static ref QUOTED_API_PATH: Regex = Regex::new(r#""([^"]+\.api)""#).unwrap();
}

/// Something the caller has to act on after feeding a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An import statement naming this raw (unresolved) path.
    Import(String),
    /// A record closed with at least one qualifying field.
    Record(Record),
}

/// Scanner state for a single document.
#[derive(Debug, Default)]
pub struct Scanner {
    in_import_block: bool,
    in_type_block: bool,
    current: Option<Record>,
    brace_depth: i64,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a record body is open.
    pub fn in_record(&self) -> bool {
        self.current.is_some()
    }

    pub fn in_type_block(&self) -> bool {
        self.in_type_block
    }

    pub fn in_import_block(&self) -> bool {
        self.in_import_block
    }

    /// Feed one raw line. At most one event results from a line.
    pub fn feed(&mut self, raw: &str) -> Option<Event> {
        let line = raw.trim();

        if line.starts_with("import (") {
            self.in_import_block = true;
            return None;
        }

        if self.in_import_block {
            if line == ")" {
                self.in_import_block = false;
                return None;
            }
            return capture(&QUOTED_API_PATH, line).map(Event::Import);
        }

        if let Some(path) = capture(&SINGLE_IMPORT, line) {
            return Some(Event::Import(path));
        }

        if line.starts_with("type (") {
            self.in_type_block = true;
            return None;
        }

        if self.in_type_block && line == ")" {
            self.in_type_block = false;
            return None;
        }

        if !self.in_type_block {
            return None;
        }

        if self.current.is_none() {
            self.open_record(line);
            return None;
        }

        self.brace_depth += brace_balance(line);
        if self.brace_depth <= 0 {
            return self.current.take().and_then(close_record);
        }

        if let (Some(record), Some(field)) = (self.current.as_mut(), parse_field(line)) {
            tracing::trace!(
                record = %record.name,
                field = %field.name,
                rule = %field.rule,
                "found field with validate tag"
            );
            record.fields.push(field);
        }
        None
    }

    /// Consume the scanner at end of input. A record still open here has no
    /// closing brace and is dropped.
    pub fn finish(self) {
        if let Some(record) = self.current {
            tracing::trace!(
                record = %record.name,
                depth = self.brace_depth,
                "record not closed before end of document, dropped"
            );
        }
    }

    fn open_record(&mut self, line: &str) {
        if !line.contains('{') {
            return;
        }
        let Some(name) = capture(&RECORD_NAME, line) else {
            return;
        };

        let depth = brace_balance(line);
        if depth <= 0 {
            // `Empty {}` closes on its own line and cannot hold fields.
            tracing::trace!(record = %name, "single-line record dropped");
            return;
        }

        self.brace_depth = depth;
        self.current = Some(Record::new(name));
    }
}

/// Scan a whole text, ignoring imports. Convenience for callers that only
/// want the records declared in one document.
pub fn scan_records(text: &str) -> Vec<Record> {
    let mut scanner = Scanner::new();
    let mut records = Vec::new();
    for line in text.lines() {
        if let Some(Event::Record(record)) = scanner.feed(line) {
            records.push(record);
        }
    }
    scanner.finish();
    records
}

fn close_record(record: Record) -> Option<Event> {
    if record.is_qualifying() {
        tracing::debug!(
            record = %record.name,
            fields = record.fields.len(),
            "found struct with validate tags"
        );
        Some(Event::Record(record))
    } else {
        tracing::trace!(record = %record.name, "no validate tags, dropped");
        None
    }
}

/// Match a field declaration and keep it only if it has a `validate` rule.
fn parse_field(line: &str) -> Option<Field> {
    if line.starts_with("//") {
        return None;
    }

    let caps = FIELD.captures(line)?;
    let tags = &caps[3];

    let rule = capture(&VALIDATE_TAG, tags).filter(|r| !r.is_empty())?;
    let json = capture(&JSON_TAG, tags).filter(|j| !j.is_empty());

    Some(Field {
        name: caps[1].to_string(),
        ty: caps[2].to_string(),
        rule,
        json,
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn brace_balance(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}
