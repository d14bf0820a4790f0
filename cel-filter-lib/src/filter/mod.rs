//! Compile-once, evaluate-many filtering of admission requests using CEL
//!
//! This module evaluates a list of policy expressions against admission requests. It uses
//! the CEL (Common Expression Language) interpreter to provide a safe, side-effect-free
//! evaluation environment.
//!
//! # Implementation Model
//!
//! Evaluation happens in two phases:
//!
//! 1. **Compile**: [`FilterCompiler::compile`] compiles each [`ExpressionAccessor`] on its own
//!    into a [`CompilationResult`], holding either a program or the compile error. An empty
//!    list produces no filter at all.
//! 2. **Evaluate**: [`Filter::for_input`] projects the object, old object, parameters and
//!    request metadata into values, binds them in an [`Activation`], and runs every program
//!    against it, producing one [`EvaluationResult`] per expression in the original order.
//!
//! Expressions see exactly four variables, named by [`Variable`]: `object`, `oldObject`,
//! `params`, and `request`. Absent inputs are bound to `null`.
//!
//! Failures of a single expression, whether at compile time or at run time, are recorded
//! in that expression's [`Disposition`] and never prevent the other expressions from being
//! evaluated. Only a failure to convert the inputs fails the evaluation as a whole.

mod activation;
mod compiler;
mod evaluation_result;
mod evaluator;
mod expression;
mod projection;

pub use activation::{Activation, Variable};
pub use compiler::{CelCompiler, CompilationResult, ExpressionCompiler, FilterCompiler, Program};
pub use evaluation_result::{Disposition, EvaluationResult};
pub use evaluator::Filter;
pub use expression::{Expression, ExpressionAccessor};
pub use projection::{json_to_value, project, value_to_json};
