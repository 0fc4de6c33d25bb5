//! # apival-codegen — Go Validation Code Emission
//!
//! Turns the records produced by `apival-schema` into Go source for a
//! go-zero `internal/types` package.
//!
//! ## Output files
//!
//! | File | Written when | Overwritten |
//! |------|--------------|-------------|
//! | `validate.go` | at least one record | always |
//! | `translator.go` | translator enabled | always |
//! | `translator_custom.go` | translator enabled | never |
//!
//! `validate.go` and `translator.go` are pure functions of the records and
//! [`EmitOptions`], so regenerating with the same input is byte-identical.
//! `translator_custom.go` is the user's file. Whether to scaffold it is
//! decided once per run by [`CustomizationPolicy::resolve`], before any file
//! is written.

pub mod emit;
pub mod error;
pub mod options;
pub mod templates;

pub use emit::{
    emit, types_dir, EmitReport, EmittedFile, Emitter, FileAction, CUSTOM_TRANSLATOR_FILE,
    TRANSLATOR_FILE, VALIDATE_FILE,
};
pub use error::EmitError;
pub use options::{CustomizationPolicy, EmitOptions, Locale, UnknownLocale};
