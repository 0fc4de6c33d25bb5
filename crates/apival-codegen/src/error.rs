use std::path::PathBuf;

use thiserror::Error;

/// Errors returned while writing generated files.
#[derive(Error, Debug)]
pub enum EmitError {
    /// `<dir>/internal/types` does not exist. It is never created here,
    /// goctl creates it when it generates the types package.
    #[error("types directory not found: {}", path.display())]
    TypesDirMissing { path: PathBuf },

    /// A generated file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
