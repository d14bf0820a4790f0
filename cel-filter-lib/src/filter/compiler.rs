//! Compiles expression sources into a [`Filter`]

use super::{Activation, ExpressionAccessor, Filter, Variable};
use crate::Result;
use cel_interpreter::{ExecutionError, Value};
use core::fmt::Debug;
use ohno::{AppError, app_err};
use std::sync::Arc;

const LOG_TARGET: &str = "  compiler";

/// An executable form of one expression
///
/// Programs are shared by every evaluation of a filter and must be safe to execute concurrently.
/// Run-time failures are reported as the interpreter's own error, which carries no backtrace and
/// renders the same way on every call.
pub trait Program: Debug + Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the expression fails at run time against the given bindings
    fn execute(&self, activation: &Activation) -> Result<Value, ExecutionError>;
}

/// Turns the source text of a single expression into a [`Program`]
pub trait ExpressionCompiler: Debug + Send + Sync {
    /// Compile `expression`; `has_param` indicates whether the `params` variable is declared.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be parsed or references an undeclared variable
    fn compile(&self, expression: &str, has_param: bool) -> Result<Arc<dyn Program>>;
}

/// Compiles expressions with the CEL interpreter
///
/// Without `has_param`, any reference to the name `params` is rejected, including a
/// comprehension variable that happens to be called `params`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelCompiler;

impl ExpressionCompiler for CelCompiler {
    fn compile(&self, expression: &str, has_param: bool) -> Result<Arc<dyn Program>> {
        let program = cel_interpreter::Program::compile(expression).map_err(|e| app_err!("compilation failed: {e}"))?;

        if !has_param && program.references().has_variable(Variable::Params.name()) {
            return Err(app_err!("compilation failed: undeclared reference to '{}'", Variable::Params));
        }

        Ok(Arc::new(CelProgram { program }))
    }
}

#[derive(Debug)]
struct CelProgram {
    program: cel_interpreter::Program,
}

impl Program for CelProgram {
    fn execute(&self, activation: &Activation) -> Result<Value, ExecutionError> {
        self.program.execute(activation.context())
    }
}

/// The compile-time outcome for one expression
///
/// Holds either a program or the error that prevented producing one.
#[derive(Debug)]
pub struct CompilationResult {
    expression_accessor: Arc<dyn ExpressionAccessor>,
    program: Option<Arc<dyn Program>>,
    error: Option<AppError>,
}

impl CompilationResult {
    pub(crate) fn new(expression_accessor: Arc<dyn ExpressionAccessor>, outcome: Result<Arc<dyn Program>>) -> Self {
        let (program, error) = match outcome {
            Ok(program) => (Some(program), None),
            Err(e) => (None, Some(e)),
        };

        Self {
            expression_accessor,
            program,
            error,
        }
    }

    #[cfg(test)]
    pub(crate) fn without_program(expression_accessor: Arc<dyn ExpressionAccessor>) -> Self {
        Self {
            expression_accessor,
            program: None,
            error: None,
        }
    }

    #[must_use]
    pub fn expression_accessor(&self) -> &Arc<dyn ExpressionAccessor> {
        &self.expression_accessor
    }

    #[must_use]
    pub fn program(&self) -> Option<&Arc<dyn Program>> {
        self.program.as_ref()
    }

    #[must_use]
    pub const fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }
}

/// Compiles lists of expressions into filters
#[derive(Debug, Clone)]
pub struct FilterCompiler {
    compiler: Arc<dyn ExpressionCompiler>,
}

impl FilterCompiler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_compiler(CelCompiler)
    }

    #[must_use]
    pub fn with_compiler(compiler: impl ExpressionCompiler + 'static) -> Self {
        Self {
            compiler: Arc::new(compiler),
        }
    }

    /// Compile every expression into a filter, preserving order
    ///
    /// Each expression compiles on its own, so one failure never affects the others. Returns
    /// `None` when `expressions` is empty: there is nothing to evaluate.
    #[must_use]
    pub fn compile(&self, expressions: &[Arc<dyn ExpressionAccessor>], has_param: bool) -> Option<Filter> {
        if expressions.is_empty() {
            return None;
        }

        let compilation_results = expressions
            .iter()
            .map(|expression_accessor| self.compile_expression(Arc::clone(expression_accessor), has_param))
            .collect();

        Some(Filter::new(compilation_results))
    }

    /// Compile a single expression
    #[must_use]
    pub fn compile_expression(&self, expression_accessor: Arc<dyn ExpressionAccessor>, has_param: bool) -> CompilationResult {
        let outcome = self.compiler.compile(expression_accessor.expression(), has_param);
        if let Err(e) = &outcome {
            log::debug!(target: LOG_TARGET, "Could not compile '{}': {}", expression_accessor.expression(), e.message());
        }

        CompilationResult::new(expression_accessor, outcome)
    }
}

impl Default for FilterCompiler {
    fn default() -> Self {
        Self::new()
    }
}
