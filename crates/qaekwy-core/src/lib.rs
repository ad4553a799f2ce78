//! Qaekwy Core - building blocks for declarative constraint models
//!
//! This crate provides the pieces every model is assembled from:
//! - `Expression`: text-assembling builder for the engine's expression grammar
//! - `Variable`: scalar, array and matrix decision variables with their wire form
//! - `SearcherType` and branching strategies
//! - Matrix identifier codec and wire-map readers
//! - Constraint-name generators

pub mod error;
pub mod expr;
pub mod naming;
pub mod names;
pub mod searcher;
pub mod variable;
pub mod wire;

pub use error::{ModelError, Result};
pub use expr::Expression;
pub use naming::{decode_matrix_name, encode_matrix_name, MatrixName};
pub use names::{NameGenerator, RandomNames, SequentialNames};
pub use searcher::SearcherType;
pub use variable::{
    BranchValue, BranchVariable, Domain, Numeric, ValueKind, Variable, VariableBuilder,
    VariableKind, VectorSelection, VectorView, NO_BRANCHING_ORDER,
};
pub use wire::WireMap;
