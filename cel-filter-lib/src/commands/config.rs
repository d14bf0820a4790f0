use crate::Result;
use crate::filter::{Expression, ExpressionAccessor};
use camino::Utf8Path;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::sync::Arc;

/// The default policy TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Whether expressions may refer to the `params` variable
    #[serde(default)]
    pub has_params: bool,

    /// Expressions evaluated against every admission request, in order
    #[serde(default)]
    pub expressions: Vec<Expression>,
}

impl Config {
    /// Load a policy from a file, or use the default policy when no path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).into_app_err_with(|| format!("reading policy file '{path}'"))?;
        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing policy file '{path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default policy to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default policy to {output_path}"))?;
        Ok(())
    }

    /// The expressions in order, ready to be compiled
    #[must_use]
    pub fn accessors(&self) -> Vec<Arc<dyn ExpressionAccessor>> {
        self.expressions
            .iter()
            .map(|expression| Arc::new(expression.clone()) as Arc<dyn ExpressionAccessor>)
            .collect()
    }

    /// Validate the policy
    ///
    /// Expression source is not compiled here; compile errors are reported per expression.
    ///
    /// # Errors
    ///
    /// Returns an error if an expression name is repeated or an expression is blank
    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();

        for expression in &self.expressions {
            if !names.insert(expression.name()) {
                return Err(app_err!("expression name '{}' is used more than once", expression.name()));
            }

            if expression.expression().trim().is_empty() {
                return Err(app_err!("expression '{}' has no expression text", expression.name()));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert!(!config.has_params);
        assert!(!config.expressions.is_empty());
    }

    #[test]
    fn test_validate_duplicate_names() {
        let config = Config {
            has_params: false,
            expressions: vec![
                Expression::new("same".to_string(), None, "true".to_string()),
                Expression::new("same".to_string(), None, "false".to_string()),
            ],
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'same' is used more than once"));
    }

    #[test]
    fn test_validate_blank_expression() {
        let config = Config {
            has_params: false,
            expressions: vec![Expression::new("blank".to_string(), None, "   ".to_string())],
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_does_not_compile() {
        let config = Config {
            has_params: false,
            expressions: vec![Expression::new("broken".to_string(), None, "((".to_string())],
        };

        config.validate().unwrap();
    }

    #[test]
    fn test_load_without_path_uses_default() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.expressions.len(), Config::default().expressions.len());
    }

    #[test]
    fn test_load_missing_file() {
        let path = Utf8PathBuf::from("definitely/not/here/policy.toml");
        let err = Config::load(Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("reading policy file"));
    }

    #[test]
    fn test_save_and_load_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().join("policy.toml")).unwrap();

        Config::save_default(&path).unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();

        assert_eq!(config.expressions, Config::default().expressions);
    }

    #[test]
    fn test_accessors_preserve_order() {
        let config = Config::default();
        let accessors = config.accessors();

        assert_eq!(accessors.len(), config.expressions.len());
        for (accessor, expression) in accessors.iter().zip(&config.expressions) {
            assert_eq!(accessor.expression(), expression.expression());
        }
    }
}
