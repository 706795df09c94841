//! Configuration validation support.

use thiserror::Error;

use crate::core::errors::ForensicsError;

/// Errors produced when validating a configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field holds a value outside its accepted domain.
    #[error("invalid value for field '{field}': {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A required field is empty or missing.
    #[error("missing required field '{field}'")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}

impl ConfigError {
    /// Creates an invalid-value error for a named field.
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for ForensicsError {
    /// Converts a ConfigError to ForensicsError::Config.
    fn from(error: ConfigError) -> Self {
        Self::Config {
            message: error.to_string(),
        }
    }
}

/// Trait for configurations that can check their own invariants.
///
/// Pipeline builders call `validate` before constructing a runtime so that
/// bad values fail fast with a descriptive error instead of surfacing as
/// silent misbehavior mid-request.
pub trait ConfigValidator {
    /// Validates the configuration, returning the first violation found.
    fn validate(&self) -> Result<(), ConfigError>;
}
