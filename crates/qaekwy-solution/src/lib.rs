//! Qaekwy Solution - decoding what the engine sends back
//!
//! - `Solution`: records decoded into scalars, sequences and matrices
//! - `Response` and its typed views for status, solutions, version and
//!   explanation replies

pub mod error;
pub mod response;
pub mod solution;
pub mod value;


pub use error::{Result, SolutionError};
pub use response::{
    Explanation, ExplanationEntry, ExplanationResponse, Response, SolutionResponse,
    StatusResponse, VersionInfo, VersionResponse, STATUS_OK,
};
pub use solution::{Solution, MAX_POSITION};
pub use value::{flatten, unflatten, Cell, SolutionValue};
