//! Error types for building and (de)serializing Qaekwy models

use thiserror::Error;

/// Main error type for model construction and wire-format conversion.
///
/// None of these are recovered internally: they describe caller misuse or a
/// document the engine and this client disagree about.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Misuse of the builder API (conflicting domains, bad matrix prefix, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A submittable document was requested but no searcher was selected
    #[error("No search strategy defined; call set_searcher before exporting the model")]
    MissingSearchStrategy,

    /// The constraint `type` tag has no registry entry
    #[error("Unknown constraint type: {0}")]
    UnknownConstraintType(String),

    /// The cutoff `name` tag has no registry entry
    #[error("Unknown cutoff: {0}")]
    UnknownCutoff(String),

    /// The variable `type` tag is not one of the six recognized tags
    #[error("Unsupported variable type: {0}")]
    UnsupportedVariableType(String),

    /// A constraint or objective names a variable the model does not contain
    #[error("Variable '{0}' not found in the model")]
    ReferencedVariableNotFound(String),

    /// A wire map is missing a field or carries one of the wrong shape
    #[error("Malformed field '{field}': {reason}")]
    MalformedWire {
        /// Offending field name
        field: String,
        /// What was wrong with it
        reason: String,
    },
}

impl ModelError {
    /// Returns a stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::Configuration(_) => "MODEL_CONFIGURATION",
            ModelError::MissingSearchStrategy => "MODEL_MISSING_SEARCHER",
            ModelError::UnknownConstraintType(_) => "MODEL_UNKNOWN_CONSTRAINT",
            ModelError::UnknownCutoff(_) => "MODEL_UNKNOWN_CUTOFF",
            ModelError::UnsupportedVariableType(_) => "MODEL_UNSUPPORTED_VARIABLE",
            ModelError::ReferencedVariableNotFound(_) => "MODEL_VARIABLE_NOT_FOUND",
            ModelError::MalformedWire { .. } => "MODEL_MALFORMED_WIRE",
        }
    }

    /// Shorthand for [`ModelError::Configuration`].
    pub fn config(message: impl Into<String>) -> Self {
        ModelError::Configuration(message.into())
    }

    /// Shorthand for [`ModelError::MalformedWire`].
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::MalformedWire {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ModelError::MissingSearchStrategy.code(), "MODEL_MISSING_SEARCHER");
        assert_eq!(
            ModelError::ReferencedVariableNotFound("x".into()).code(),
            "MODEL_VARIABLE_NOT_FOUND"
        );
    }

    #[test]
    fn test_display_names_missing_variable() {
        let err = ModelError::ReferencedVariableNotFound("grid".into());
        assert_eq!(err.to_string(), "Variable 'grid' not found in the model");
    }

    #[test]
    fn test_malformed_display() {
        let err = ModelError::malformed("v1", "expected a string");
        assert_eq!(err.to_string(), "Malformed field 'v1': expected a string");
    }
}
