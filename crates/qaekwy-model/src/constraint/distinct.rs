//! All-different constraints over an array or part of a matrix.
//!
//! All four selections share the `distinct` wire tag and differ by the
//! `selection` field. Slice corners are inclusive here and end-exclusive on
//! the wire.

use serde_json::Value;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, Result, Variable, VariableKind, VectorSelection, VectorView};

use super::collection::resolve_array_field;
use super::{named, require_array, resolve, wire_name, Constraint, ConstraintKind};

/// Which cells a distinctness constraint covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistinctSelection {
    /// Every cell of the array.
    Standard,
    /// One matrix row; `size` is the column count.
    Row { size: usize, index: usize },
    /// One matrix column; `size` is the row count.
    Col { size: usize, index: usize },
    /// A rectangle with inclusive corners; `size` is the column count.
    Slice {
        size: usize,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    },
}

impl DistinctSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistinctSelection::Standard => "standard",
            DistinctSelection::Row { .. } => "row",
            DistinctSelection::Col { .. } => "col",
            DistinctSelection::Slice { .. } => "slice",
        }
    }

    pub(super) fn write_wire(&self, map: &mut WireMap) {
        map.insert("selection".into(), Value::from(self.as_str()));
        match *self {
            DistinctSelection::Standard => {}
            DistinctSelection::Row { size, index } | DistinctSelection::Col { size, index } => {
                map.insert("size".into(), Value::from(size));
                map.insert("index".into(), Value::from(index));
            }
            DistinctSelection::Slice {
                size,
                row_start,
                col_start,
                row_end,
                col_end,
            } => {
                map.insert("size".into(), Value::from(size));
                map.insert("offset_start_x".into(), Value::from(row_start));
                map.insert("offset_start_y".into(), Value::from(col_start));
                map.insert("offset_end_x".into(), Value::from(row_end + 1));
                map.insert("offset_end_y".into(), Value::from(col_end + 1));
            }
        }
    }

    fn read_wire(map: &WireMap) -> Result<DistinctSelection> {
        let selection = wire::opt_str_field(map, "selection")?.unwrap_or("standard");
        match selection {
            "standard" => Ok(DistinctSelection::Standard),
            "row" => Ok(DistinctSelection::Row {
                size: wire::usize_field(map, "size")?,
                index: wire::usize_field(map, "index")?,
            }),
            "col" => Ok(DistinctSelection::Col {
                size: wire::usize_field(map, "size")?,
                index: wire::usize_field(map, "index")?,
            }),
            "slice" => Ok(DistinctSelection::Slice {
                size: wire::usize_field(map, "size")?,
                row_start: wire::usize_field(map, "offset_start_x")?,
                col_start: wire::usize_field(map, "offset_start_y")?,
                row_end: exclusive_end(map, "offset_end_x")?,
                col_end: exclusive_end(map, "offset_end_y")?,
            }),
            other => Err(ModelError::malformed(
                "selection",
                format!("unknown selection '{other}'"),
            )),
        }
    }
}

fn exclusive_end(map: &WireMap, field: &str) -> Result<usize> {
    wire::usize_field(map, field)?
        .checked_sub(1)
        .ok_or_else(|| ModelError::malformed(field, "end offset must be at least 1"))
}

fn matrix_shape(variable: &Variable, what: &str) -> Result<(usize, usize)> {
    match variable.kind() {
        VariableKind::Matrix { rows, cols, .. } => Ok((*rows, *cols)),
        _ => Err(ModelError::config(format!(
            "distinct {what} needs a matrix, but '{}' is not one",
            variable.name()
        ))),
    }
}

impl Constraint {
    /// All cells of `array` take different values.
    pub fn distinct(array: &Variable) -> Result<Constraint> {
        require_array(array, "distinct")?;
        Ok(Constraint::distinct_with(array, DistinctSelection::Standard))
    }

    pub fn distinct_row(matrix: &Variable, row: usize) -> Result<Constraint> {
        let (rows, cols) = matrix_shape(matrix, "row")?;
        if row >= rows {
            return Err(ModelError::config(format!(
                "row {row} is outside a matrix with {rows} rows"
            )));
        }
        Ok(Constraint::distinct_with(
            matrix,
            DistinctSelection::Row {
                size: cols,
                index: row,
            },
        ))
    }

    pub fn distinct_col(matrix: &Variable, col: usize) -> Result<Constraint> {
        let (rows, cols) = matrix_shape(matrix, "col")?;
        if col >= cols {
            return Err(ModelError::config(format!(
                "column {col} is outside a matrix with {cols} columns"
            )));
        }
        Ok(Constraint::distinct_with(
            matrix,
            DistinctSelection::Col {
                size: rows,
                index: col,
            },
        ))
    }

    /// Rectangle with inclusive corners `(row_start, col_start)` and
    /// `(row_end, col_end)`.
    pub fn distinct_slice(
        matrix: &Variable,
        row_start: usize,
        col_start: usize,
        row_end: usize,
        col_end: usize,
    ) -> Result<Constraint> {
        let (rows, cols) = matrix_shape(matrix, "slice")?;
        if row_start > row_end || col_start > col_end || row_end >= rows || col_end >= cols {
            return Err(ModelError::config(format!(
                "slice ({row_start},{col_start})..=({row_end},{col_end}) does not fit a {rows}x{cols} matrix"
            )));
        }
        Ok(Constraint::distinct_with(
            matrix,
            DistinctSelection::Slice {
                size: cols,
                row_start,
                col_start,
                row_end,
                col_end,
            },
        ))
    }

    /// Distinctness over a row, column or slice view.
    pub fn distinct_view(view: &VectorView<'_>) -> Result<Constraint> {
        let matrix = view.variable();
        match view.selection() {
            VectorSelection::Row(row) => Constraint::distinct_row(matrix, row),
            VectorSelection::Col(col) => Constraint::distinct_col(matrix, col),
            VectorSelection::Slice {
                row_start,
                col_start,
                row_end,
                col_end,
            } => Constraint::distinct_slice(matrix, row_start, col_start, row_end, col_end),
        }
    }

    fn distinct_with(array: &Variable, selection: DistinctSelection) -> Constraint {
        Constraint::new(ConstraintKind::Distinct {
            array: array.name().to_string(),
            selection,
        })
    }
}

pub(super) fn distinct_from_wire(
    _tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let selection = DistinctSelection::read_wire(map)?;
    let array = match selection {
        DistinctSelection::Standard => resolve_array_field(map, "v1", variables)?,
        _ => {
            let name = wire::str_field(map, "v1")?;
            let variable = resolve(variables, name)?;
            if !variable.is_matrix() {
                return Err(ModelError::malformed(
                    "v1",
                    format!("'{name}' is not a matrix, required by '{}'", selection.as_str()),
                ));
            }
            name.to_string()
        }
    };
    Ok(named(ConstraintKind::Distinct { array, selection }, wire_name(map)?))
}
