//! Qaekwy - declarative constraint models for a remote solver engine
//!
//! Build a model from variables, constraints and objectives, ship it to an
//! engine through a [`Transport`], and read back decoded solutions. The
//! `http` feature adds a blocking `HttpTransport`.
//!
//! # Example
//!
//! ```rust
//! use qaekwy::prelude::*;
//!
//! let x = Variable::integer("x").bounds(0, 10).build().unwrap();
//! let a = Variable::integer_array("a", 3).bounds(0, 5).build().unwrap();
//!
//! let mut modeller = Modeller::new();
//! modeller
//!     .add_constraint(Constraint::distinct(&a).unwrap())
//!     .add_constraint(Constraint::relational(x.expr().gt(a.at(0))))
//!     .add_objective(Objective::maximize(&x))
//!     .add_variable(x)
//!     .add_variable(a)
//!     .set_searcher(SearcherType::Bab);
//!
//! let document = modeller.serialize(true).unwrap();
//! assert_eq!(document["searcher"], "BAB");
//! assert_eq!(document["constraint"][0]["name"], "c0");
//! ```

pub mod engine;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod logging;
pub mod model;
pub mod transport;

pub use engine::Engine;
pub use error::{EngineError, Result};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use model::{DistinctTarget, Model};
pub use transport::{Transport, TransportError};

pub use qaekwy_config::{ClientConfig, ConfigError, SolveConfig};
pub use qaekwy_core::{
    BranchValue, BranchVariable, Domain, Expression, ModelError, NameGenerator, Numeric,
    RandomNames, SearcherType, SequentialNames, ValueKind, Variable, VariableBuilder,
    VariableKind, VectorView, WireMap,
};
pub use qaekwy_model::{
    Constraint, ConstraintKind, Cutoff, Direction, DistinctSelection, Modeller, Objective,
};
pub use qaekwy_solution::{
    Explanation, ExplanationResponse, Response, Solution, SolutionError, SolutionResponse,
    SolutionValue, StatusResponse, VersionInfo, VersionResponse,
};

pub mod prelude {
    pub use super::{
        BranchValue, BranchVariable, Constraint, Cutoff, Engine, EngineError, Expression, Model,
        Modeller, Objective, SearcherType, Solution, SolutionValue, Transport, TransportError,
        ValueKind, Variable,
    };
}
