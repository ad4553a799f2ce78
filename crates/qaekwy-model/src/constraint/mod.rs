//! Constraint kinds.
//!
//! Every constraint is a [`Constraint`]: an optional name plus a
//! [`ConstraintKind`] holding only the fields that kind needs. Variables are
//! referenced by name; [`Constraint::from_wire`] resolves those names
//! against the model's variables through the [`registry`].

mod collection;
mod distinct;
mod math;
pub mod registry;
mod relational;


use serde_json::Value;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{Expression, ModelError, Numeric, Result, ValueKind, Variable};

pub use collection::SortOrder;
pub use distinct::DistinctSelection;
pub use math::{ArithmeticOp, ExponentOp, MathFunction};

/// A named constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: Option<String>,
    kind: ConstraintKind,
}

/// Kind-specific payload of a [`Constraint`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintKind {
    /// `result = function(operand)`
    Math {
        function: MathFunction,
        operand: String,
        result: String,
    },
    /// `result = op(lhs, rhs)`
    Arithmetic {
        op: ArithmeticOp,
        lhs: String,
        rhs: String,
        result: String,
    },
    /// `result = op(base, exponent)` with a literal exponent
    Exponent {
        op: ExponentOp,
        base: String,
        exponent: Numeric,
        result: String,
    },
    /// `value` occurs in `array`
    Member { array: String, value: String },
    /// `array[index] = value`
    Element {
        array: String,
        index: String,
        value: String,
    },
    /// `array` is ordered
    Sorted { order: SortOrder, array: String },
    /// Pairwise distinct cells of `array`, restricted by `selection`
    Distinct {
        array: String,
        selection: DistinctSelection,
    },
    /// A free-form boolean expression
    Relational { expr: Expression, varset: ValueKind },
    /// If `condition` then `then` else `otherwise`
    Conditional {
        condition: Expression,
        then: Expression,
        otherwise: Option<Expression>,
        varset: ValueKind,
    },
}

impl ConstraintKind {
    /// Wire `type` tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ConstraintKind::Math { function, .. } => function.tag(),
            ConstraintKind::Arithmetic { op, .. } => op.tag(),
            ConstraintKind::Exponent { op, .. } => op.tag(),
            ConstraintKind::Member { .. } => "member",
            ConstraintKind::Element { .. } => "element",
            ConstraintKind::Sorted { order, .. } => order.tag(),
            ConstraintKind::Distinct { .. } => "distinct",
            ConstraintKind::Relational { .. } | ConstraintKind::Conditional { .. } => "rel",
        }
    }
}

impl Constraint {
    pub fn new(kind: ConstraintKind) -> Self {
        Self { name: None, kind }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert(
            "name".into(),
            self.name.as_deref().map_or(Value::Null, Value::from),
        );
        match &self.kind {
            ConstraintKind::Math {
                operand, result, ..
            } => {
                put_str(&mut map, "v1", operand);
                put_str(&mut map, "v2", result);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Arithmetic {
                lhs, rhs, result, ..
            } => {
                put_str(&mut map, "v1", lhs);
                put_str(&mut map, "v2", rhs);
                put_str(&mut map, "v3", result);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Exponent {
                base,
                exponent,
                result,
                ..
            } => {
                put_str(&mut map, "v1", base);
                map.insert("v2".into(), exponent.to_value());
                put_str(&mut map, "v3", result);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Member { array, value } => {
                put_str(&mut map, "v1", array);
                put_str(&mut map, "v2", value);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Element {
                array,
                index,
                value,
            } => {
                put_str(&mut map, "map", array);
                put_str(&mut map, "v1", index);
                put_str(&mut map, "v2", value);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Sorted { array, .. } => {
                put_str(&mut map, "v1", array);
                put_tag(&mut map, self.tag());
            }
            ConstraintKind::Distinct { array, selection } => {
                put_tag(&mut map, self.tag());
                put_str(&mut map, "v1", array);
                selection.write_wire(&mut map);
            }
            ConstraintKind::Relational { expr, varset } => {
                put_str(&mut map, "expr", expr.as_str());
                put_tag(&mut map, self.tag());
                if *varset != ValueKind::Integer {
                    put_str(&mut map, "varset", varset.scalar_tag());
                }
            }
            ConstraintKind::Conditional {
                condition,
                then,
                otherwise,
                varset,
            } => {
                let composite = relational::composite(condition, then, otherwise.as_ref());
                put_str(&mut map, "expr", composite.as_str());
                put_tag(&mut map, self.tag());
                put_str(&mut map, "subtype", "ite");
                put_str(&mut map, "ite_condition", condition.as_str());
                put_str(&mut map, "ite_then", then.as_str());
                put_str(
                    &mut map,
                    "ite_else",
                    otherwise.as_ref().map_or(relational::NO_ELSE, |e| e.as_str()),
                );
                put_str(&mut map, "varset", varset.scalar_tag());
            }
        }
        map
    }

    /// Parses a constraint through the registry, resolving variable names
    /// against `variables`.
    pub fn from_wire(map: &WireMap, variables: &[Variable]) -> Result<Constraint> {
        registry::deserialize(map, variables)
    }
}

fn put_str(map: &mut WireMap, key: &str, value: &str) {
    map.insert(key.to_string(), Value::from(value));
}

fn put_tag(map: &mut WireMap, tag: &str) {
    put_str(map, "type", tag);
}

/// Looks a variable up by wire name.
pub fn resolve<'a>(variables: &'a [Variable], name: &str) -> Result<&'a Variable> {
    variables
        .iter()
        .find(|v| v.name() == name)
        .ok_or_else(|| ModelError::ReferencedVariableNotFound(name.to_string()))
}

/// Reads `field` as a variable name and checks the model has it.
fn resolve_field(map: &WireMap, field: &str, variables: &[Variable]) -> Result<String> {
    let name = wire::str_field(map, field)?;
    resolve(variables, name).map(|v| v.name().to_string())
}

/// The constraint's own `name`, if the wire map carries one.
fn wire_name(map: &WireMap) -> Result<Option<String>> {
    Ok(wire::opt_str_field(map, "name")?.map(str::to_string))
}

fn named(kind: ConstraintKind, name: Option<String>) -> Constraint {
    Constraint { name, kind }
}

fn require_array(variable: &Variable, role: &str) -> Result<()> {
    if variable.is_array() {
        Ok(())
    } else {
        Err(ModelError::config(format!(
            "{role} needs an array or matrix, but '{}' is a scalar",
            variable.name()
        )))
    }
}
