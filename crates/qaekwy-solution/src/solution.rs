//! Decoding engine solution records into named values.
//!
//! The engine reports one record per scalar or per array slot:
//! `{name, assigned, value, position?}`. Slots may arrive out of order or be
//! skipped. Flat matrices come back under their `MATRIX$<rows>$<cols>$<base>`
//! identifier and are re-chunked under `base`.

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, warn};

use qaekwy_core::decode_matrix_name;

use crate::error::{Result, SolutionError};
use crate::value::{unflatten, Cell, SolutionValue};

const RULE_WIDTH: usize = 40;

/// Largest slot index accepted in a record.
pub const MAX_POSITION: usize = (1 << 24) - 1;

/// One solution: variable name to decoded value, in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Solution {
    values: IndexMap<String, SolutionValue>,
}

impl Solution {
    /// Decodes a JSON array of solution records.
    pub fn from_value(records: &Value) -> Result<Solution> {
        let records = records
            .as_array()
            .ok_or_else(|| SolutionError::response("content", "expected an array of records"))?;
        Solution::from_records(records)
    }

    /// Decodes solution records.
    pub fn from_records(records: &[Value]) -> Result<Solution> {
        let mut values: IndexMap<String, SolutionValue> = IndexMap::new();
        for (index, record) in records.iter().enumerate() {
            let record = parse_record(index, record)?;
            match record.position {
                None => {
                    if matches!(values.get(record.name), Some(SolutionValue::Sequence(_))) {
                        return Err(SolutionError::ShapeConflict(record.name.to_string()));
                    }
                    values.insert(record.name.to_string(), SolutionValue::Scalar(record.value));
                }
                Some(position) => {
                    let slot = values
                        .entry(record.name.to_string())
                        .or_insert_with(|| SolutionValue::Sequence(Vec::new()));
                    let SolutionValue::Sequence(cells) = slot else {
                        return Err(SolutionError::ShapeConflict(record.name.to_string()));
                    };
                    let needed = position
                        .checked_add(1)
                        .ok_or_else(|| SolutionError::record(index, "'position' out of range"))?;
                    if cells.len() < needed {
                        cells.resize(needed, None);
                    }
                    cells[position] = record.value;
                }
            }
        }

        let mut decoded = IndexMap::with_capacity(values.len());
        for (name, value) in values.into_iter().map(reshape_matrix) {
            if decoded.contains_key(&name) {
                return Err(SolutionError::ShapeConflict(name));
            }
            decoded.insert(name, value);
        }
        let values = decoded;
        debug!(variables = values.len(), "Decoded solution");
        Ok(Solution { values })
    }

    pub fn get(&self, name: &str) -> Option<&SolutionValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SolutionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Integer value of scalar `name`.
    pub fn i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(SolutionValue::as_i64)
    }

    /// Float value of scalar `name`.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(SolutionValue::as_f64)
    }

    /// Boolean value of scalar `name`.
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(SolutionValue::as_bool)
    }

    pub fn sequence(&self, name: &str) -> Option<&[Cell]> {
        self.get(name).and_then(SolutionValue::as_sequence)
    }

    pub fn matrix(&self, name: &str) -> Option<&[Vec<Cell>]> {
        self.get(name).and_then(SolutionValue::as_matrix)
    }

    /// Plain JSON object of every decoded value.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_value()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = (&'a String, &'a SolutionValue);
    type IntoIter = indexmap::map::Iter<'a, String, SolutionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

struct Record<'a> {
    name: &'a str,
    value: Cell,
    position: Option<usize>,
}

fn parse_record(index: usize, record: &Value) -> Result<Record<'_>> {
    let map = record
        .as_object()
        .ok_or_else(|| SolutionError::record(index, "expected an object"))?;
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| SolutionError::record(index, "missing string 'name'"))?;
    let assigned = map
        .get("assigned")
        .and_then(Value::as_bool)
        .ok_or_else(|| SolutionError::record(index, "missing boolean 'assigned'"))?;
    let value = match map.get("value") {
        Some(value) if assigned && !value.is_null() => Some(value.clone()),
        _ => None,
    };
    let position = match map.get("position") {
        None => None,
        Some(position) => {
            let position = position
                .as_u64()
                .and_then(|p| usize::try_from(p).ok())
                .ok_or_else(|| {
                    SolutionError::record(index, "'position' must be a non-negative integer")
                })?;
            if position > MAX_POSITION {
                return Err(SolutionError::record(
                    index,
                    format!("'position' {position} exceeds {MAX_POSITION}"),
                ));
            }
            Some(position)
        }
    };
    Ok(Record {
        name,
        value,
        position,
    })
}

/// Re-chunks a flat matrix sequence and re-keys it under its base name.
fn reshape_matrix((name, value): (String, SolutionValue)) -> (String, SolutionValue) {
    let SolutionValue::Sequence(cells) = &value else {
        return (name, value);
    };
    let Some(matrix) = decode_matrix_name(&name) else {
        return (name, value);
    };
    if cells.len() > matrix.rows * matrix.cols {
        warn!(
            name = %name,
            cells = cells.len(),
            rows = matrix.rows,
            cols = matrix.cols,
            "Matrix solution has more cells than its shape; extra cells dropped"
        );
    }
    let rows = unflatten(cells, matrix.rows, matrix.cols);
    (matrix.base.to_string(), SolutionValue::Matrix(rows))
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        None => "-".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Human-readable table: scalars and sequences on one padded line each,
/// matrices as a header followed by indented rows.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty solution");
        }
        let rule = "-".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, "Solution:")?;
        writeln!(f, "{rule}")?;

        let mut entries: Vec<_> = self.values.iter().collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        let width = entries.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        for (name, value) in entries {
            match value {
                SolutionValue::Scalar(None) => writeln!(f, "{name:<width$}: unassigned")?,
                SolutionValue::Scalar(cell) => {
                    writeln!(f, "{name:<width$}: {}", render_cell(cell))?
                }
                SolutionValue::Matrix(rows) if !rows.is_empty() => {
                    let cols = rows.first().map_or(0, Vec::len);
                    writeln!(f, "{name}: ({} x {cols} matrix)", rows.len())?;
                    for row in rows {
                        let cells: Vec<String> = row.iter().map(render_cell).collect();
                        writeln!(f, "    {}", cells.join(" "))?;
                    }
                }
                SolutionValue::Matrix(_) => writeln!(f, "{name:<width$}: []")?,
                SolutionValue::Sequence(cells) => {
                    let cells: Vec<String> = cells.iter().map(render_cell).collect();
                    writeln!(f, "{name:<width$}: [{}]", cells.join(", "))?
                }
            }
        }
        writeln!(f, "{rule}")
    }
}
