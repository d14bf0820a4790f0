//! Evaluation of compiled expressions against admission requests

use super::{Activation, CompilationResult, Disposition, EvaluationResult, Variable, project};
use crate::Result;
use crate::admission::{AdmissionRequest, VersionedAttributes};
use core::time::Duration;
use ohno::AppError;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

const LOG_TARGET: &str = "    filter";

/// A compiled set of expressions, evaluated as a unit against one admission request at a time
///
/// A filter is immutable once compiled; any number of threads may evaluate against it concurrently.
#[derive(Debug)]
pub struct Filter {
    compilation_results: Vec<CompilationResult>,
}

impl Filter {
    pub(crate) fn new(compilation_results: Vec<CompilationResult>) -> Self {
        log::trace!(target: LOG_TARGET, "Created filter with {} expression(s)", compilation_results.len());
        Self { compilation_results }
    }

    #[must_use]
    pub fn compilation_results(&self) -> &[CompilationResult] {
        &self.compilation_results
    }

    /// Every compile error, in expression order
    #[must_use]
    pub fn compilation_errors(&self) -> Vec<&AppError> {
        self.compilation_results.iter().filter_map(CompilationResult::error).collect()
    }

    /// Evaluate every expression against one admission request
    ///
    /// The returned results line up with the compiled expressions: `results[i]` belongs to
    /// expression `i`. Compile and runtime failures are recorded on the result of the expression
    /// that failed and never stop evaluation of the others.
    ///
    /// # Errors
    ///
    /// Returns an error if the object, old object, parameters or request cannot be converted into
    /// values; no expression is evaluated in that case.
    pub fn for_input<O, P>(
        &self,
        versioned_attr: &VersionedAttributes<O>,
        versioned_params: Option<&P>,
        request: &AdmissionRequest,
    ) -> Result<Vec<EvaluationResult>>
    where
        O: Serialize,
        P: Serialize,
    {
        let old_object = project(Variable::OldObject, versioned_attr.old_object.as_ref())?;
        let object = project(Variable::Object, versioned_attr.object.as_ref())?;
        let params = project(Variable::Params, versioned_params)?;
        let request = project(Variable::Request, Some(request))?;

        let activation = Activation::new(object, old_object, params, request);

        let evaluations = self
            .compilation_results
            .iter()
            .map(|compilation_result| evaluate(compilation_result, &activation))
            .collect();

        Ok(evaluations)
    }
}

fn evaluate(compilation_result: &CompilationResult, activation: &Activation) -> EvaluationResult {
    let expression_accessor = Arc::clone(compilation_result.expression_accessor());

    if let Some(e) = compilation_result.error() {
        return EvaluationResult::new(
            expression_accessor,
            Disposition::CompilationFailed(format!("compilation error: {}", e.message())),
            Duration::ZERO,
        );
    }

    let Some(program) = compilation_result.program() else {
        return EvaluationResult::new(
            expression_accessor,
            Disposition::InternalError("unexpected internal error compiling expression".to_string()),
            Duration::ZERO,
        );
    };

    let start = Instant::now();
    let outcome = program.execute(activation);
    let elapsed = start.elapsed();

    log::debug!(
        target: LOG_TARGET,
        "Evaluated '{}' in {:.6}s",
        expression_accessor.expression(),
        elapsed.as_secs_f64()
    );

    let disposition = match outcome {
        Ok(value) => Disposition::Value(value),
        Err(e) => Disposition::EvaluationFailed(format!(
            "expression '{}' resulted in error: {e}",
            expression_accessor.expression()
        )),
    };

    EvaluationResult::new(expression_accessor, disposition, elapsed)
}
