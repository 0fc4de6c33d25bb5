//! # File Emission
//!
//! Applies the write policy on top of [`templates`](crate::templates):
//!
//! - nothing to do when there are no records, not even the directory check
//! - `<output>/internal/types` must already exist
//! - `validate.go` and `translator.go` are rewritten unconditionally
//! - `translator_custom.go` follows the [`CustomizationPolicy`] resolved
//!   when the [`Emitter`] is built

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use apival_schema::Record;

use crate::error::EmitError;
use crate::options::{CustomizationPolicy, EmitOptions};
use crate::templates;

pub const VALIDATE_FILE: &str = "validate.go";
pub const TRANSLATOR_FILE: &str = "translator.go";
pub const CUSTOM_TRANSLATOR_FILE: &str = "translator_custom.go";

/// The go-zero types package directory under an output root.
pub fn types_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("internal").join("types")
}

/// What happened to one output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Written,
    /// Left as found (the customization stub on later runs).
    Preserved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedFile {
    pub path: PathBuf,
    pub action: FileAction,
}

/// Summary of one emission run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Records that received a `Validate` method.
    pub records: usize,
    pub files: Vec<EmittedFile>,
}

impl EmitReport {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|f| f.action == FileAction::Written)
            .map(|f| f.path.as_path())
    }

    pub fn written_count(&self) -> usize {
        self.written().count()
    }

    pub fn action_for(&self, file_name: &str) -> Option<FileAction> {
        self.files
            .iter()
            .find(|f| f.path.file_name().is_some_and(|n| n == file_name))
            .map(|f| f.action)
    }
}

/// Emit all files for `records` under `output_dir`.
///
/// # Errors
///
/// [`EmitError::TypesDirMissing`] if there is something to write and the
/// types directory does not exist, [`EmitError::Write`] on I/O failure.
pub fn emit(
    records: &[Record],
    options: &EmitOptions,
    output_dir: &Path,
) -> Result<EmitReport, EmitError> {
    if records.is_empty() {
        tracing::info!("no structures with validate tags found");
        return Ok(EmitReport::default());
    }

    Emitter::new(options.clone(), output_dir)?.emit(records)
}

/// Writes the files for one run into an existing types directory.
#[derive(Debug)]
pub struct Emitter {
    options: EmitOptions,
    dir: PathBuf,
    customization: CustomizationPolicy,
}

impl Emitter {
    /// Check the types directory and resolve the customization policy.
    pub fn new(options: EmitOptions, output_dir: &Path) -> Result<Self, EmitError> {
        let dir = types_dir(output_dir);
        if !dir.is_dir() {
            return Err(EmitError::TypesDirMissing { path: dir });
        }

        let customization = CustomizationPolicy::resolve(&dir.join(CUSTOM_TRANSLATOR_FILE));
        Ok(Self::with_policy(options, dir, customization))
    }

    /// Build an emitter for `types_dir` with an explicit policy. The
    /// directory is not checked.
    pub fn with_policy(
        options: EmitOptions,
        types_dir: PathBuf,
        customization: CustomizationPolicy,
    ) -> Self {
        Self {
            options,
            dir: types_dir,
            customization,
        }
    }

    pub fn types_dir(&self) -> &Path {
        &self.dir
    }

    pub fn customization(&self) -> CustomizationPolicy {
        self.customization
    }

    pub fn emit(&self, records: &[Record]) -> Result<EmitReport, EmitError> {
        let unique = unique_records(records);
        let mut report = EmitReport {
            records: unique.len(),
            files: Vec::new(),
        };

        let validate_path = self.dir.join(VALIDATE_FILE);
        write_file(
            &validate_path,
            &templates::render_validate(&unique, &self.options),
        )?;
        tracing::info!(
            structures = unique.len(),
            path = %validate_path.display(),
            "generated validation code"
        );
        report.files.push(EmittedFile {
            path: validate_path,
            action: FileAction::Written,
        });

        if self.options.translator {
            self.emit_translator(&mut report)?;
        }

        Ok(report)
    }

    fn emit_translator(&self, report: &mut EmitReport) -> Result<(), EmitError> {
        let translator_path = self.dir.join(TRANSLATOR_FILE);
        write_file(&translator_path, &templates::render_translator(&self.options))?;
        tracing::info!(
            locale = %self.options.locale,
            path = %translator_path.display(),
            "generated translator code"
        );
        report.files.push(EmittedFile {
            path: translator_path,
            action: FileAction::Written,
        });

        let custom_path = self.dir.join(CUSTOM_TRANSLATOR_FILE);
        let action = match self.customization {
            CustomizationPolicy::Scaffold => {
                write_file(&custom_path, &templates::render_custom_stub(&self.options))?;
                tracing::info!(path = %custom_path.display(), "generated custom translator template");
                FileAction::Written
            }
            CustomizationPolicy::Preserve => {
                tracing::info!(path = %custom_path.display(), "custom translator file already exists, skipped");
                FileAction::Preserved
            }
        };
        report.files.push(EmittedFile {
            path: custom_path,
            action,
        });

        Ok(())
    }
}

/// Keep the first record of each name. Go rejects a second `Validate`
/// method on the same type.
fn unique_records(records: &[Record]) -> Vec<&Record> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|record| {
            let first = seen.insert(record.name.as_str());
            if !first {
                tracing::warn!(record = %record.name, "duplicate record name, keeping the first declaration");
            }
            first
        })
        .collect()
}

fn write_file(path: &Path, content: &str) -> Result<(), EmitError> {
    std::fs::write(path, content).map_err(|source| EmitError::Write {
        path: path.to_path_buf(),
        source,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use apival_schema::Field;
    use proptest::prelude::*;

    fn record_strategy() -> impl Strategy<Value = Record> {
        (
            "[A-Z][a-zA-Z0-9]{0,12}",
            prop::collection::vec(("[A-Z][a-zA-Z]{0,8}", "[a-z=,0-9]{1,16}"), 1..5),
        )
            .prop_map(|(name, fields)| Record {
                name,
                fields: fields
                    .into_iter()
                    .map(|(name, rule)| Field {
                        name,
                        ty: "string".to_string(),
                        rule,
                        json: None,
                    })
                    .collect(),
            })
    }

    proptest! {
        /// Rendering is a pure function of records and options.
        #[test]
        fn render_is_deterministic(records in prop::collection::vec(record_strategy(), 1..8)) {
            let options = EmitOptions::default();
            let unique = unique_records(&records);
            let a = templates::render_validate(&unique, &options);
            let b = templates::render_validate(&unique, &options);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.matches(") Validate() error {").count(), unique.len());
        }
    }
}
