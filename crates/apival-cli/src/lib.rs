//! # apival-cli — `goctl-validate`
//!
//! goctl plugin entry point. goctl runs it as
//!
//! ```bash
//! goctl api plugin -plugin goctl-validate -api user.api -dir .
//! goctl api plugin -plugin goctl-validate="--translator --locale en" -api user.api -dir .
//! ```
//!
//! and pipes a JSON payload naming the API file and project directory on
//! stdin. The same paths can be passed directly with `--api` and `--dir`.
//! Go-style single-dash long flags (`-translator`, `-locale=en`) are
//! accepted as well.
//!
//! ## Option precedence
//!
//! CLI flag, then the `GOCTL_VALIDATE_TRANSLATOR=true` environment fallback
//! (translator switch only), then `--config` file, then defaults.

pub mod config;
pub mod generate;
pub mod plugin;

/// Environment variable that enables the translator when set to `true`.
pub const TRANSLATOR_ENV: &str = "GOCTL_VALIDATE_TRANSLATOR";

/// Prefix of every line written to stdout.
pub const TOOL_NAME: &str = "goctl-validate";
