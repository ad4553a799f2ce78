//! Constraints over whole arrays: membership, element lookup and ordering.

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, Result, Variable};

use super::{
    named, require_array, resolve, resolve_field, wire_name, Constraint, ConstraintKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn tag(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "sorted",
            SortOrder::Descending => "rsorted",
        }
    }
}

impl Constraint {
    /// `value` equals one of the cells of `array`.
    pub fn member(array: &Variable, value: &Variable) -> Result<Constraint> {
        require_array(array, "member")?;
        Ok(Constraint::new(ConstraintKind::Member {
            array: array.name().to_string(),
            value: value.name().to_string(),
        }))
    }

    /// `array[index] = value`
    pub fn element(array: &Variable, index: &Variable, value: &Variable) -> Result<Constraint> {
        require_array(array, "element")?;
        Ok(Constraint::new(ConstraintKind::Element {
            array: array.name().to_string(),
            index: index.name().to_string(),
            value: value.name().to_string(),
        }))
    }

    /// Cells of `array` in ascending order.
    pub fn sorted(array: &Variable) -> Result<Constraint> {
        Constraint::sort(SortOrder::Ascending, array)
    }

    /// Cells of `array` in descending order.
    pub fn reverse_sorted(array: &Variable) -> Result<Constraint> {
        Constraint::sort(SortOrder::Descending, array)
    }

    fn sort(order: SortOrder, array: &Variable) -> Result<Constraint> {
        require_array(array, order.tag())?;
        Ok(Constraint::new(ConstraintKind::Sorted {
            order,
            array: array.name().to_string(),
        }))
    }
}

/// Resolves `field` and insists it names an array or matrix.
pub(super) fn resolve_array_field(
    map: &WireMap,
    field: &str,
    variables: &[Variable],
) -> Result<String> {
    let variable = resolve(variables, wire::str_field(map, field)?)?;
    if variable.is_scalar() {
        return Err(ModelError::malformed(
            field,
            format!("'{}' is a scalar, expected an array", variable.name()),
        ));
    }
    Ok(variable.name().to_string())
}

pub(super) fn member_from_wire(
    _tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let kind = ConstraintKind::Member {
        array: resolve_array_field(map, "v1", variables)?,
        value: resolve_field(map, "v2", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}

pub(super) fn element_from_wire(
    _tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let kind = ConstraintKind::Element {
        array: resolve_array_field(map, "map", variables)?,
        index: resolve_field(map, "v1", variables)?,
        value: resolve_field(map, "v2", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}

pub(super) fn sorted_from_wire(
    tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let order = match tag {
        "sorted" => SortOrder::Ascending,
        "rsorted" => SortOrder::Descending,
        other => return Err(ModelError::UnknownConstraintType(other.to_string())),
    };
    let kind = ConstraintKind::Sorted {
        order,
        array: resolve_array_field(map, "v1", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}
