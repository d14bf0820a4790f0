use super::Host;
use super::config::Config;
use crate::Result;
use crate::filter::{ExpressionAccessor, FilterCompiler};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::app_err;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to policy file (the built-in default policy is used when omitted)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Load a policy and compile every expression in it
///
/// Returns the number of expressions that compiled, or an error listing the ones that did not.
fn validate_config_inner(config_path: Option<&Utf8PathBuf>) -> Result<usize> {
    let config = Config::load(config_path.map(Utf8PathBuf::as_path))?;

    let Some(filter) = FilterCompiler::new().compile(&config.accessors(), config.has_params) else {
        return Ok(0);
    };

    let failures: Vec<String> = config
        .expressions
        .iter()
        .zip(filter.compilation_results())
        .filter_map(|(expression, result)| {
            result
                .error()
                .map(|e| format!("  {} ('{}'): {}", expression.name(), expression.expression(), e.message()))
        })
        .collect();

    if failures.is_empty() {
        Ok(config.expressions.len())
    } else {
        Err(app_err!(
            "{} expression(s) failed to compile:\n{}",
            failures.len(),
            failures.join("\n")
        ))
    }
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match validate_config_inner(config_path) {
        Ok(count) => {
            let _ = writeln!(host.output(), "Policy is valid ({count} expression(s) compiled)");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Policy file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default policy (no policy file given)");
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Policy validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}
