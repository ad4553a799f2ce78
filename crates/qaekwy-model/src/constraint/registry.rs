//! Wire `type` tag to deserializer mapping.
//!
//! The table is the single source of truth for which constraint tags this
//! client understands. A tag missing here is rejected, never skipped.

use tracing::trace;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, Result, Variable};

use super::collection::{element_from_wire, member_from_wire, sorted_from_wire};
use super::distinct::distinct_from_wire;
use super::math::{arithmetic_from_wire, exponent_from_wire, math_from_wire};
use super::relational::rel_from_wire;
use super::Constraint;

/// Rebuilds a constraint given its tag, wire map and the model's variables.
pub type Deserializer = fn(&str, &WireMap, &[Variable]) -> Result<Constraint>;

/// Every constraint tag with its deserializer.
pub static CONSTRAINTS: &[(&str, Deserializer)] = &[
    ("abs", math_from_wire),
    ("sin", math_from_wire),
    ("cos", math_from_wire),
    ("tan", math_from_wire),
    ("asin", math_from_wire),
    ("acos", math_from_wire),
    ("atan", math_from_wire),
    ("exp", math_from_wire),
    ("log", math_from_wire),
    ("div", arithmetic_from_wire),
    ("mul", arithmetic_from_wire),
    ("mod", arithmetic_from_wire),
    ("min", arithmetic_from_wire),
    ("max", arithmetic_from_wire),
    ("pow", exponent_from_wire),
    ("nroot", exponent_from_wire),
    ("member", member_from_wire),
    ("element", element_from_wire),
    ("sorted", sorted_from_wire),
    ("rsorted", sorted_from_wire),
    ("distinct", distinct_from_wire),
    ("rel", rel_from_wire),
];

/// Looks up the deserializer for `tag`.
pub fn lookup(tag: &str) -> Option<Deserializer> {
    CONSTRAINTS
        .iter()
        .find(|(known, _)| *known == tag)
        .map(|(_, deserializer)| *deserializer)
}

/// Dispatches on the map's `type` tag.
pub fn deserialize(map: &WireMap, variables: &[Variable]) -> Result<Constraint> {
    let tag = wire::str_field(map, "type")?;
    let deserializer =
        lookup(tag).ok_or_else(|| ModelError::UnknownConstraintType(tag.to_string()))?;
    trace!(tag, "Deserializing constraint");
    deserializer(tag, map, variables)
}
