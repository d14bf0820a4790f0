use super::Host;
use super::common::ColorMode;
use super::config::Config;
use super::report::{generate_console, generate_json};
use crate::Result;
use crate::admission::{AdmissionAttributes, AdmissionRequest, VersionedAttributes};
use crate::filter::FilterCompiler;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ohno::{IntoAppError, app_err};
use serde::de::DeserializeOwned;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "      eval";

/// Output format for evaluation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per expression
    #[default]
    Console,

    /// A JSON document with one entry per expression
    Json,
}

#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Path to policy file (the built-in default policy is used when omitted)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// JSON file holding the object being admitted
    #[arg(long, value_name = "PATH")]
    pub object: Option<Utf8PathBuf>,

    /// JSON file holding the object as it was before the request
    #[arg(long, value_name = "PATH")]
    pub old_object: Option<Utf8PathBuf>,

    /// JSON file holding the policy parameters
    #[arg(long, value_name = "PATH")]
    pub params: Option<Utf8PathBuf>,

    /// JSON file holding the request attributes (operation, user, resource, ...)
    #[arg(long, value_name = "PATH")]
    pub attributes: Option<Utf8PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    pub format: OutputFormat,

    /// Colorize console output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T> {
    let text = fs::read_to_string(path).into_app_err_with(|| format!("reading '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("parsing '{path}'"))
}

fn read_optional_json<T: DeserializeOwned>(path: Option<&Utf8PathBuf>) -> Result<Option<T>> {
    path.map(|path| read_json(path)).transpose()
}

/// Evaluate a policy against one admission request assembled from JSON files
///
/// # Errors
///
/// Returns an error if an input cannot be read, or if any expression fails to compile or evaluate.
pub fn eval_policy<H: Host>(host: &mut H, args: &EvalArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let attributes: AdmissionAttributes = read_optional_json(args.attributes.as_ref())?.unwrap_or_default();
    let object: Option<serde_json::Value> = read_optional_json(args.object.as_ref())?;
    let old_object: Option<serde_json::Value> = read_optional_json(args.old_object.as_ref())?;
    let params: Option<serde_json::Value> = read_optional_json(args.params.as_ref())?;

    let Some(filter) = FilterCompiler::new().compile(&config.accessors(), config.has_params) else {
        let _ = writeln!(host.output(), "No expressions to evaluate");
        return Ok(());
    };

    let versioned_attr = VersionedAttributes::new(attributes, object, old_object);
    let request = AdmissionRequest::from_attributes(&versioned_attr.attributes);
    let results = filter.for_input(&versioned_attr, params.as_ref(), &request)?;

    let mut report = String::new();
    match args.format {
        OutputFormat::Console => generate_console(&config.expressions, &results, args.color.use_colors(), &mut report)?,
        OutputFormat::Json => generate_json(&config.expressions, &results, &mut report)?,
    }

    let _ = write!(host.output(), "{report}");
    if args.format == OutputFormat::Json {
        let _ = writeln!(host.output());
    }

    let failed = results.iter().filter(|result| result.is_error()).count();
    log::debug!(target: LOG_TARGET, "Evaluated {} expression(s), {failed} failed", results.len());

    if failed > 0 {
        return Err(app_err!("{failed} of {} expression(s) failed", results.len()));
    }

    Ok(())
}
