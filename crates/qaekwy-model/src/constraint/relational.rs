//! Expression-based constraints: free relations and if/then/else.

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{Expression, Result, ValueKind, Variable};

use super::{named, wire_name, Constraint, ConstraintKind};

/// Wire marker for a conditional without an else branch.
pub(super) const NO_ELSE: &str = "None";

/// `(C & T) | (!(C) & E)`, or `C & T` without an else branch.
pub(super) fn composite(
    condition: &Expression,
    then: &Expression,
    otherwise: Option<&Expression>,
) -> Expression {
    match otherwise {
        Some(otherwise) => Expression::raw(format!(
            "({condition} & {then}) | (!({condition}) & {otherwise})"
        )),
        None => Expression::raw(format!("{condition} & {then}")),
    }
}

impl Constraint {
    /// Requires `expr` to hold. Integer variable set.
    pub fn relational(expr: impl Into<Expression>) -> Constraint {
        Constraint::new(ConstraintKind::Relational {
            expr: expr.into(),
            varset: ValueKind::Integer,
        })
    }

    pub fn if_then(condition: impl Into<Expression>, then: impl Into<Expression>) -> Constraint {
        Constraint::new(ConstraintKind::Conditional {
            condition: condition.into(),
            then: then.into(),
            otherwise: None,
            varset: ValueKind::Integer,
        })
    }

    pub fn if_then_else(
        condition: impl Into<Expression>,
        then: impl Into<Expression>,
        otherwise: impl Into<Expression>,
    ) -> Constraint {
        Constraint::new(ConstraintKind::Conditional {
            condition: condition.into(),
            then: then.into(),
            otherwise: Some(otherwise.into()),
            varset: ValueKind::Integer,
        })
    }

    /// Sets the variable set an expression constraint ranges over.
    /// Other kinds are returned unchanged.
    pub fn over(mut self, kind: ValueKind) -> Constraint {
        match &mut self.kind {
            ConstraintKind::Relational { varset, .. }
            | ConstraintKind::Conditional { varset, .. } => *varset = kind,
            _ => {}
        }
        self
    }

    /// The composite boolean expression of a conditional, the expression of
    /// a relational constraint, `None` for every other kind.
    pub fn expression(&self) -> Option<Expression> {
        match &self.kind {
            ConstraintKind::Relational { expr, .. } => Some(expr.clone()),
            ConstraintKind::Conditional {
                condition,
                then,
                otherwise,
                ..
            } => Some(composite(condition, then, otherwise.as_ref())),
            _ => None,
        }
    }
}

/// `rel` covers both relational and conditional constraints. The composite
/// `expr` of a conditional is never parsed; the three parts are authoritative.
pub(super) fn rel_from_wire(
    _tag: &str,
    map: &WireMap,
    _variables: &[Variable],
) -> Result<Constraint> {
    let varset = wire::opt_str_field(map, "varset")?
        .map(ValueKind::from_varset)
        .unwrap_or(ValueKind::Integer);

    let kind = if wire::opt_str_field(map, "subtype")? == Some("ite") {
        let otherwise = wire::opt_str_field(map, "ite_else")?
            .filter(|text| !text.is_empty() && *text != NO_ELSE)
            .map(Expression::raw);
        ConstraintKind::Conditional {
            condition: Expression::raw(wire::str_field(map, "ite_condition")?),
            then: Expression::raw(wire::str_field(map, "ite_then")?),
            otherwise,
            varset,
        }
    } else {
        ConstraintKind::Relational {
            expr: Expression::raw(wire::str_field(map, "expr")?),
            varset,
        }
    };
    Ok(named(kind, wire_name(map)?))
}
