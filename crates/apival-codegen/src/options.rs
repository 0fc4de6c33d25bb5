//! # Emission Options
//!
//! Everything the renderer needs besides the records. Options are plain
//! values: the CLI builds them once from flags, environment and config file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locale of the generated translator.
///
/// Each variant maps onto a `github.com/go-playground/locales/<tag>` package
/// and the matching `validator/v10/translations/<tag>` package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
    Ja,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Zh, Locale::En, Locale::Ja];

    /// Package and translator tag, e.g. `zh`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
            Locale::Ja => "ja",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned by [`Locale::from_str`] for tags without a translation package.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale '{0}' (expected one of: zh, en, ja)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Locale::ALL
            .into_iter()
            .find(|l| l.tag() == wanted)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Settings for one emission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Generate `translator.go` and, if absent, `translator_custom.go`.
    pub translator: bool,
    pub locale: Locale,
    /// Go package clause of every generated file.
    pub package: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            translator: false,
            locale: Locale::default(),
            package: "types".to_string(),
        }
    }
}

/// What to do with `translator_custom.go`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomizationPolicy {
    /// The file does not exist yet: write the stub.
    Scaffold,
    /// The file exists: leave it untouched.
    Preserve,
}

impl CustomizationPolicy {
    /// Decide from the current state of the file system.
    pub fn resolve(custom_file: &Path) -> Self {
        if custom_file.exists() {
            CustomizationPolicy::Preserve
        } else {
            CustomizationPolicy::Scaffold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_case_insensitively() {
        assert_eq!("ZH".parse::<Locale>().unwrap(), Locale::Zh);
        assert_eq!(" en ".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        let err = "klingon".parse::<Locale>().unwrap_err();
        assert!(err.to_string().contains("klingon"));
    }

    #[test]
    fn defaults_match_goctl_types_package() {
        let options = EmitOptions::default();
        assert!(!options.translator);
        assert_eq!(options.locale, Locale::Zh);
        assert_eq!(options.package, "types");
    }

    #[test]
    fn policy_follows_file_existence() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("translator_custom.go");
        assert_eq!(CustomizationPolicy::resolve(&custom), CustomizationPolicy::Scaffold);
        std::fs::write(&custom, "package types\n").unwrap();
        assert_eq!(CustomizationPolicy::resolve(&custom), CustomizationPolicy::Preserve);
    }
}
