//! Variable wire format.
//!
//! Field order follows what the engine emits: identity and branching first,
//! then the optional domain, then matrix geometry.

use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::expr::Expression;
use crate::wire::{self, WireMap};

use super::builder::matrix_identifier;
use super::{
    BranchValue, BranchVariable, Domain, Numeric, ValueKind, Variable, VariableKind,
    NO_BRANCHING_ORDER,
};

impl Variable {
    pub fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("name".into(), Value::from(self.name.as_str()));
        map.insert("type".into(), Value::from(self.type_tag()));
        if let Some(brancher_variable) = self.brancher_variable() {
            map.insert("length".into(), Value::from(self.len()));
            map.insert(
                "brancher_variable".into(),
                Value::from(brancher_variable.as_str()),
            );
        }
        map.insert(
            "brancher_value".into(),
            Value::from(self.brancher_value.as_str()),
        );
        map.insert("branching_order".into(), Value::from(self.branching_order));

        match &self.domain {
            Domain::Unrestricted => {}
            Domain::Bounds { low, high } => {
                map.insert("domlow".into(), low.to_value());
                map.insert("domup".into(), high.to_value());
            }
            Domain::Specific(values) => {
                map.insert(
                    "specific_domain".into(),
                    Value::Array(values.iter().map(|v| v.to_value()).collect()),
                );
            }
            Domain::Expression(expr) => {
                map.insert("expr".into(), Value::from(expr.as_str()));
            }
        }

        if let VariableKind::Matrix { rows, cols, .. } = self.kind {
            map.insert("rows".into(), Value::from(rows));
            map.insert("cols".into(), Value::from(cols));
            map.insert("subtype".into(), Value::from("matrix"));
        }
        map
    }

    /// Rebuilds a scalar, array or matrix from its wire map.
    pub fn from_wire(map: &WireMap) -> Result<Variable> {
        let name = wire::str_field(map, "name")?;
        let tag = wire::str_field(map, "type")?;
        let (value_kind, is_array) = parse_type_tag(tag)?;

        let brancher_value: BranchValue = parse_strategy(map, "brancher_value")?;
        if !brancher_value.supports(value_kind) {
            return Err(ModelError::malformed(
                "brancher_value",
                format!("{brancher_value} is not available for {value_kind} variables"),
            ));
        }
        let branching_order =
            wire::opt_i64_field(map, "branching_order")?.unwrap_or(NO_BRANCHING_ORDER);
        let domain = parse_domain(map, is_array)?;

        let (name, kind) = if is_array {
            let brancher_variable: BranchVariable = parse_strategy(map, "brancher_variable")?;
            if !brancher_variable.supports(value_kind) {
                return Err(ModelError::malformed(
                    "brancher_variable",
                    format!("{brancher_variable} is not available for {value_kind} arrays"),
                ));
            }
            if wire::opt_str_field(map, "subtype")? == Some("matrix") {
                let rows = wire::usize_field(map, "rows")?;
                let cols = wire::usize_field(map, "cols")?;
                (
                    matrix_identifier(name, rows, cols)?,
                    VariableKind::Matrix {
                        rows,
                        cols,
                        brancher_variable,
                    },
                )
            } else {
                let length = wire::usize_field(map, "length")?;
                (
                    name.to_string(),
                    VariableKind::Array {
                        length,
                        brancher_variable,
                    },
                )
            }
        } else {
            (name.to_string(), VariableKind::Scalar)
        };

        Ok(Variable {
            name,
            value_kind,
            kind,
            domain,
            brancher_value,
            branching_order,
        })
    }
}

fn parse_type_tag(tag: &str) -> Result<(ValueKind, bool)> {
    match tag {
        "integer" => Ok((ValueKind::Integer, false)),
        "float" => Ok((ValueKind::Float, false)),
        "boolean" => Ok((ValueKind::Boolean, false)),
        "integer_array" => Ok((ValueKind::Integer, true)),
        "float_array" => Ok((ValueKind::Float, true)),
        "boolean_array" => Ok((ValueKind::Boolean, true)),
        other => Err(ModelError::UnsupportedVariableType(other.to_string())),
    }
}

fn parse_strategy<S>(map: &WireMap, field: &str) -> Result<S>
where
    S: std::str::FromStr<Err = ModelError> + Default,
{
    match wire::opt_str_field(map, field)? {
        None => Ok(S::default()),
        Some(text) => text
            .parse()
            .map_err(|_| ModelError::malformed(field, format!("unknown strategy '{text}'"))),
    }
}

fn parse_numeric(value: &Value, field: &str) -> Result<Numeric> {
    Numeric::from_value(value).ok_or_else(|| ModelError::malformed(field, "expected a number"))
}

fn parse_domain(map: &WireMap, is_array: bool) -> Result<Domain> {
    let low = map.get("domlow").filter(|v| !v.is_null());
    let high = map.get("domup").filter(|v| !v.is_null());
    let specific = map.get("specific_domain").filter(|v| !v.is_null());
    let expr = wire::opt_str_field(map, "expr")?;

    let present = [low.or(high).is_some(), specific.is_some(), expr.is_some()]
        .iter()
        .filter(|p| **p)
        .count();
    if present > 1 {
        return Err(ModelError::malformed(
            "domain",
            "bounds, specific_domain and expr are mutually exclusive",
        ));
    }

    if let Some(text) = expr {
        if is_array {
            return Err(ModelError::malformed("expr", "arrays cannot carry an expression"));
        }
        return Ok(Domain::Expression(Expression::raw(text)));
    }
    if let Some(values) = specific {
        let values = values
            .as_array()
            .ok_or_else(|| ModelError::malformed("specific_domain", "expected an array"))?
            .iter()
            .map(|v| parse_numeric(v, "specific_domain"))
            .collect::<Result<Vec<_>>>()?;
        return Ok(Domain::Specific(values));
    }
    match (low, high) {
        (None, None) => Ok(Domain::Unrestricted),
        (Some(low), Some(high)) => Ok(Domain::Bounds {
            low: parse_numeric(low, "domlow")?,
            high: parse_numeric(high, "domup")?,
        }),
        (Some(_), None) => Err(ModelError::malformed("domup", "missing upper bound")),
        (None, Some(_)) => Err(ModelError::malformed("domlow", "missing lower bound")),
    }
}
