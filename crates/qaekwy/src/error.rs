//! Error type for engine interaction

use serde_json::Value;
use thiserror::Error;

use qaekwy_core::ModelError;
use qaekwy_solution::SolutionError;

use crate::transport::TransportError;

/// Anything that can go wrong between building a model and reading its
/// solutions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Solution(#[from] SolutionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The engine replied with a status other than `Ok`
    #[error("Solver error ({status}): {message}")]
    Solver {
        status: String,
        message: String,
        content: Value,
    },
}

impl EngineError {
    /// Returns a stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::Model(err) => err.code(),
            EngineError::Solution(err) => err.code(),
            EngineError::Transport(_) => "ENGINE_TRANSPORT",
            EngineError::Solver { .. } => "ENGINE_SOLVER",
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
