//! Console and JSON rendering of evaluation results
//!
//! Results line up with the policy's expressions, so each result is reported under the
//! name of the expression at the same position.

use crate::Result;
use crate::filter::{EvaluationResult, Expression, value_to_json};
use core::fmt::Write;
use owo_colors::OwoColorize;
use serde_json::json;

pub fn generate_console<W: Write>(expressions: &[Expression], results: &[EvaluationResult], use_colors: bool, writer: &mut W) -> Result<()> {
    for (expression, result) in expressions.iter().zip(results) {
        let (marker, detail) = match (result.value(), result.error()) {
            (Some(value), _) => ("✔️", value_to_json(value).to_string()),
            (None, Some(error)) => ("🗙", error.to_string()),
            (None, None) => ("🗙", String::new()),
        };

        if use_colors {
            let name = if result.is_error() {
                expression.name().red().bold().to_string()
            } else {
                expression.name().green().bold().to_string()
            };
            writeln!(writer, "{marker} {name}: {detail}")?;
        } else {
            writeln!(writer, "{marker} {}: {detail}", expression.name())?;
        }
    }

    Ok(())
}

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate_json<W: Write>(expressions: &[Expression], results: &[EvaluationResult], writer: &mut W) -> Result<()> {
    let mut entries = Vec::with_capacity(results.len());

    for (expression, result) in expressions.iter().zip(results) {
        let mut entry = serde_json::Map::new();
        entry.insert("name".to_string(), json!(expression.name()));
        entry.insert("expression".to_string(), json!(result.expression_accessor.expression()));

        if let Some(value) = result.value() {
            entry.insert("value".to_string(), value_to_json(value));
        }

        if let Some(error) = result.error() {
            entry.insert("error".to_string(), json!(error));
        }

        entry.insert(
            "elapsedMicros".to_string(),
            json!(u64::try_from(result.elapsed.as_micros()).unwrap_or(u64::MAX)),
        );
        entries.push(json!(entry));
    }

    let output = json!({
        "results": entries
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
