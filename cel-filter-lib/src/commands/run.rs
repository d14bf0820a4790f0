//! Command dispatch logic for cel-filter

use super::common::{LogLevel, init_logging};
use super::{EvalArgs, InitArgs, ValidateArgs, eval_policy, init_config, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cel-filter", version, author, long_about = None)]
#[command(about = "Evaluate CEL admission policies against Kubernetes-style requests")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    /// Diagnostic output level
    #[arg(long, value_enum, default_value = "none", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: FilterSubcommand,
}

#[derive(Subcommand, Debug)]
enum FilterSubcommand {
    /// Evaluate a policy against one admission request
    Eval(Box<EvalArgs>),
    /// Check that every expression in a policy compiles
    Validate(ValidateArgs),
    /// Generate a default policy file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.log_level);

    match &cli.command {
        FilterSubcommand::Eval(eval_args) => eval_policy(host, eval_args),
        FilterSubcommand::Validate(validate_args) => validate_config(host, validate_args),
        FilterSubcommand::Init(init_args) => init_config(host, init_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_dispatch_validate() {
        let mut host = TestHost::new();
        run(&mut host, ["cel-filter", "validate"]).unwrap();
        assert!(host.output_str().contains("Policy is valid"));
    }

    #[test]
    fn test_dispatch_init_then_eval() {
        let dir = tempfile::tempdir().unwrap();
        let policy = dir.path().join("policy.toml");
        let object = dir.path().join("object.json");
        std::fs::write(&object, r#"{"metadata": {"name": "web"}, "spec": {"replicas": 3}}"#).unwrap();

        let policy = policy.to_str().unwrap();
        let object = object.to_str().unwrap();

        let mut host = TestHost::new();
        run(&mut host, ["cel-filter", "init", policy]).unwrap();
        run(&mut host, ["cel-filter", "--log-level", "debug", "eval", "-c", policy, "--object", object, "--color", "never"]).unwrap();

        let output = host.output_str();
        assert!(output.contains("✔️ named: true"), "{output}");
        assert!(output.contains("✔️ replicas-bounded: true"), "{output}");
        assert!(output.contains("✔️ no-anonymous-deletes: true"), "{output}");
    }
}
