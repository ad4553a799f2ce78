//! Qaekwy Model - constraints, objectives, cutoffs and the Modeller
//!
//! Everything here turns into (and back from) the engine's JSON model
//! document:
//! - `Constraint`: every constraint kind plus the tag registry used to parse them
//! - `Objective`: minimize / maximize a variable
//! - `Cutoff`: leaf and composite restart schedules
//! - `Modeller`: the aggregate with its serialize / deserialize contract

pub mod constraint;
pub mod cutoff;
pub mod modeller;
pub mod objective;

pub use constraint::{
    ArithmeticOp, Constraint, ConstraintKind, DistinctSelection, ExponentOp, MathFunction,
    SortOrder,
};
pub use cutoff::Cutoff;
pub use modeller::{Modeller, DEFAULT_SOLUTION_LIMIT};
pub use objective::{Direction, Objective};
