//! Errors raised while parsing `.api` documents.
//!
//! Only the root document can fail a parse. Everything reachable through
//! imports degrades to an [`ImportWarning`](crate::ImportWarning).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`parse`](crate::parse).
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The root document could not be opened or read.
    #[error("failed to open API file {}: {source}", path.display())]
    RootUnreadable {
        /// Path as supplied by the caller.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}
