//! # Generate
//!
//! Parses the API document graph and writes the validation files.
//!
//! Exit codes: 0 on success (including "nothing to generate"), 1 on any
//! fatal error (root document unreadable, types directory missing, bad
//! config or plugin payload).

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use apival_codegen::{emit, EmitOptions, EmitReport, FileAction, Locale};
use apival_schema::Schema;

use crate::config::{resolve_options, translator_from_env, FileConfig, Overrides};
use crate::plugin::PluginPayload;
use crate::{TOOL_NAME, TRANSLATOR_ENV};

/// Arguments for a generation run.
#[derive(Args, Debug, Default, Clone)]
pub struct GenerateArgs {
    /// Root .api document. Taken from the goctl plugin payload when omitted.
    #[arg(long, value_name = "API_FILE")]
    pub api: Option<PathBuf>,

    /// Project directory containing internal/types. Taken from the goctl
    /// plugin payload when omitted.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Generate translator.go and translator_custom.go for localized messages.
    #[arg(long)]
    pub translator: bool,

    /// Translator locale (zh, en, ja). Defaults to zh.
    #[arg(long)]
    pub locale: Option<Locale>,

    /// Go package name of the generated files. Defaults to types.
    #[arg(long)]
    pub package: Option<String>,

    /// YAML file with translator, locale and package settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the parsed records as JSON and exit without writing files.
    #[arg(long)]
    pub dump_schema: bool,
}

/// Long flags that goctl users write Go-style, with a single dash.
const GO_STYLE_FLAGS: &[&str] = &[
    "api",
    "dir",
    "translator",
    "locale",
    "package",
    "config",
    "dump-schema",
    "verbose",
];

/// Rewrite `-translator` and `-locale=en` to their `--` spelling so plugin
/// arguments written for Go's `flag` package keep working. Short flags such
/// as `-v` and `-vv` pass through unchanged.
pub fn normalize_go_style_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = text.strip_prefix('-') else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if GO_STYLE_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub api_file: PathBuf,
    pub dir: PathBuf,
}

impl Invocation {
    /// Use `--api`/`--dir` when both are given, otherwise read the goctl
    /// payload from `stdin` and let any given flag override it.
    pub fn resolve(args: &GenerateArgs, stdin: impl Read) -> Result<Self> {
        if let (Some(api_file), Some(dir)) = (&args.api, &args.dir) {
            return Ok(Self {
                api_file: api_file.clone(),
                dir: dir.clone(),
            });
        }

        let payload = PluginPayload::from_reader(stdin)?;
        tracing::debug!(
            api = %payload.api_file_path.display(),
            dir = %payload.dir.display(),
            style = %payload.style,
            "received goctl plugin payload"
        );
        Ok(Self {
            api_file: args.api.clone().unwrap_or(payload.api_file_path),
            dir: args.dir.clone().unwrap_or(payload.dir),
        })
    }
}

/// Build the emission options from flags, environment and config file.
pub fn load_options(args: &GenerateArgs, translator_env: Option<&str>) -> Result<EmitOptions> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        translator_flag: args.translator,
        translator_env: translator_from_env(translator_env),
        locale: args.locale,
        package: args.package.clone(),
    };
    Ok(resolve_options(&overrides, &file))
}

/// Execute a generation run, reading the process environment.
pub fn run_generate(args: &GenerateArgs, stdin: impl Read, stdout: impl Write) -> Result<u8> {
    let env = std::env::var(TRANSLATOR_ENV).ok();
    run_generate_with_env(args, env.as_deref(), stdin, stdout)
}

/// Execute a generation run with an explicit value for
/// [`TRANSLATOR_ENV`].
pub fn run_generate_with_env(
    args: &GenerateArgs,
    translator_env: Option<&str>,
    stdin: impl Read,
    mut stdout: impl Write,
) -> Result<u8> {
    let invocation = Invocation::resolve(args, stdin)?;
    let options = load_options(args, translator_env)?;
    tracing::debug!(?options, "resolved emit options");

    let schema = apival_schema::parse(&invocation.api_file)
        .context("failed to parse API file")?;

    if args.dump_schema {
        serde_json::to_writer_pretty(&mut stdout, &schema)
            .context("failed to serialize parsed schema")?;
        writeln!(stdout)?;
        return Ok(0);
    }

    let report = emit(&schema.records, &options, &invocation.dir)
        .context("failed to generate validation code")?;

    print_summary(&mut stdout, &schema, &report)?;
    Ok(0)
}

fn print_summary(out: &mut impl Write, schema: &Schema, report: &EmitReport) -> Result<()> {
    if report.records == 0 {
        writeln!(out, "{TOOL_NAME}: no structures with validate tags found")?;
        return Ok(());
    }

    for file in &report.files {
        match file.action {
            FileAction::Written => writeln!(out, "{TOOL_NAME}: wrote {}", file.path.display())?,
            FileAction::Preserved => writeln!(
                out,
                "{TOOL_NAME}: custom translator file already exists, skipped: {}",
                file.path.display()
            )?,
        }
    }

    writeln!(
        out,
        "{TOOL_NAME}: generated validation code for {} structures from {} API files ({} files written, {} import warnings)",
        report.records,
        schema.document_count(),
        report.written_count(),
        schema.warnings.len(),
    )?;
    Ok(())
}
