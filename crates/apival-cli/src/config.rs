//! # Configuration
//!
//! Optional YAML file with the same settings as the command-line flags:
//!
//! ```yaml
//! translator: true
//! locale: en
//! package: types
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use apival_codegen::{EmitOptions, Locale};

/// Settings read from `--config`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub translator: Option<bool>,
    pub locale: Option<Locale>,
    pub package: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Values that came from flags and the environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    /// `--translator` was given.
    pub translator_flag: bool,
    /// `GOCTL_VALIDATE_TRANSLATOR` is `true`.
    pub translator_env: bool,
    pub locale: Option<Locale>,
    pub package: Option<String>,
}

/// Combine flags, environment and file into [`EmitOptions`].
///
/// The translator switch can only be turned on by a higher layer, never
/// off: flags and the environment are presence switches.
pub fn resolve_options(overrides: &Overrides, file: &FileConfig) -> EmitOptions {
    let defaults = EmitOptions::default();
    EmitOptions {
        translator: overrides.translator_flag
            || overrides.translator_env
            || file.translator.unwrap_or(defaults.translator),
        locale: overrides.locale.or(file.locale).unwrap_or(defaults.locale),
        package: overrides
            .package
            .clone()
            .or_else(|| file.package.clone())
            .unwrap_or(defaults.package),
    }
}

/// Interpret the value of [`TRANSLATOR_ENV`](crate::TRANSLATOR_ENV). Only
/// the literal `true` enables the translator.
pub fn translator_from_env(value: Option<&str>) -> bool {
    value == Some("true")
}
