//! Error types for decoding engine payloads

use thiserror::Error;

/// Errors raised while decoding solutions and response envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionError {
    /// A solution record is not `{name, assigned, value, position?}`
    #[error("Malformed solution record #{index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    /// One name was reported both with and without a `position`
    #[error("Variable '{0}' mixes positional and scalar records")]
    ShapeConflict(String),

    /// A response envelope lacks a field or has one of the wrong shape
    #[error("Malformed response field '{field}': {reason}")]
    MalformedResponse { field: String, reason: String },
}

impl SolutionError {
    /// Returns a stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolutionError::MalformedRecord { .. } => "SOLUTION_MALFORMED_RECORD",
            SolutionError::ShapeConflict(_) => "SOLUTION_SHAPE_CONFLICT",
            SolutionError::MalformedResponse { .. } => "SOLUTION_MALFORMED_RESPONSE",
        }
    }

    pub(crate) fn record(index: usize, reason: impl Into<String>) -> Self {
        SolutionError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    pub(crate) fn response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SolutionError::MalformedResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for decoding operations
pub type Result<T> = std::result::Result<T, SolutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            SolutionError::record(0, "x").code(),
            "SOLUTION_MALFORMED_RECORD"
        );
        assert_eq!(
            SolutionError::ShapeConflict("a".into()).code(),
            "SOLUTION_SHAPE_CONFLICT"
        );
        assert_eq!(
            SolutionError::response("content", "x").code(),
            "SOLUTION_MALFORMED_RESPONSE"
        );
    }

    #[test]
    fn test_display() {
        let err = SolutionError::record(3, "missing 'name'");
        assert_eq!(err.to_string(), "Malformed solution record #3: missing 'name'");
    }
}
