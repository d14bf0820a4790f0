//! Expression sources handed to the filter compiler

use core::fmt::Debug;
use serde::{Deserialize, Serialize};

/// Anything that can yield the source text of a single expression.
pub trait ExpressionAccessor: Debug + Send + Sync {
    fn expression(&self) -> &str;
}

impl ExpressionAccessor for String {
    fn expression(&self) -> &str {
        self
    }
}

/// A named policy expression, as it appears in a policy file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expression {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "expression")]
    source: String,
}

impl Expression {
    /// Create a new named expression
    ///
    /// The source text is not compiled here; compile failures are reported per expression by the filter.
    #[must_use]
    pub const fn new(name: String, description: Option<String>, source: String) -> Self {
        Self { name, description, source }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl ExpressionAccessor for Expression {
    fn expression(&self) -> &str {
        &self.source
    }
}
