//! Per-expression outcomes of one evaluation

use super::ExpressionAccessor;
use cel_interpreter::Value;
use core::time::Duration;
use std::sync::Arc;

/// What happened to one expression during an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// The expression ran and produced a value
    Value(Value),

    /// The expression never ran because it did not compile
    CompilationFailed(String),

    /// The expression has neither a program nor a compile error
    InternalError(String),

    /// The expression ran and failed against this input
    EvaluationFailed(String),
}

/// The outcome of evaluating a single expression.
#[derive(Debug, Clone)]
pub struct EvaluationResult {
    pub expression_accessor: Arc<dyn ExpressionAccessor>,
    pub disposition: Disposition,

    /// Time spent executing the expression; zero if it never ran
    pub elapsed: Duration,
}

impl EvaluationResult {
    #[must_use]
    pub const fn new(expression_accessor: Arc<dyn ExpressionAccessor>, disposition: Disposition, elapsed: Duration) -> Self {
        Self {
            expression_accessor,
            disposition,
            elapsed,
        }
    }

    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match &self.disposition {
            Disposition::Value(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.disposition {
            Disposition::Value(_) => None,
            Disposition::CompilationFailed(message) | Disposition::InternalError(message) | Disposition::EvaluationFailed(message) => {
                Some(message)
            }
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        !matches!(self.disposition, Disposition::Value(_))
    }
}
