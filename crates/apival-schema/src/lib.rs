//! # apival-schema — `.api` Document Scanner
//!
//! Extracts the records a go-zero `.api` document declares, keeping only the
//! fields that carry a `validate:"..."` struct tag.
//!
//! ## Scanning (`scanner`)
//!
//! The [`scanner`] module is a small finite-state line scanner. It tracks the
//! grouped `import ( ... )` block, the grouped `type ( ... )` block, the open
//! record and its brace depth. It is not a grammar: lines that match no
//! pattern are skipped, so schema noise never aborts a run.
//!
//! ## Import graph (`parse`)
//!
//! [`parse`] reads the root document and follows every import depth-first,
//! resolving paths relative to the importing document. Each document is
//! scanned at most once per call, which also terminates import cycles.
//!
//! ## Failure policy
//!
//! - Root document unreadable: [`SchemaError::RootUnreadable`].
//! - Imported document missing or unreadable: an [`ImportWarning`] is
//!   recorded and logged, the rest of the graph is still parsed.
//! - Records without a single `validate` tag: dropped without a warning.

pub mod error;
pub mod model;
pub mod parse;
pub mod scanner;

pub use error::SchemaError;
pub use model::{Field, ImportWarning, Record, Schema, WarningReason};
pub use parse::{parse, parse_source, resolve_import, ImportTarget};
pub use scanner::{scan_records, Event, Scanner};
