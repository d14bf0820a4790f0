//! Command-line interface for cel-filter
//!
//! This module implements the CLI commands on top of the [`filter`](crate::filter) and
//! [`admission`](crate::admission) modules.
//!
//! # Commands
//!
//! - **eval**: Assemble an admission request from JSON files, evaluate a policy against it,
//!   and print one result per expression
//! - **validate**: Compile every expression of a policy and report the ones that fail
//! - **init**: Write the built-in default policy to a file
//!
//! A policy is a TOML file holding an ordered list of named expressions and a flag saying
//! whether the expressions may use `params`. The built-in default policy is used when no file
//! is given.
//!
//! All output goes through a [`Host`], so commands can be driven from tests.

mod common;
mod config;
mod eval;
mod host;
mod init;
mod report;
mod run;
mod validate;

pub use common::{ColorMode, LogLevel, init_logging};
pub use config::{Config, DEFAULT_CONFIG_TOML};
pub use eval::{EvalArgs, OutputFormat, eval_policy};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use report::{generate_console, generate_json};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
