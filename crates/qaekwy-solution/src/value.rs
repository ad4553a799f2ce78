//! Decoded variable values.

use serde_json::Value;

/// One decoded cell. `None` means the engine left it unassigned.
pub type Cell = Option<Value>;

/// A variable's value, shaped like the variable it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SolutionValue {
    Scalar(Cell),
    Sequence(Vec<Cell>),
    Matrix(Vec<Vec<Cell>>),
}

impl SolutionValue {
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            SolutionValue::Scalar(cell) => cell.as_ref(),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Cell]> {
        match self {
            SolutionValue::Sequence(cells) => Some(cells),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&[Vec<Cell>]> {
        match self {
            SolutionValue::Matrix(rows) => Some(rows),
            _ => None,
        }
    }

    /// Scalar as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar().and_then(Value::as_i64)
    }

    /// Scalar as a float; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Value::as_f64)
    }

    /// Scalar as a boolean. The engine reports booleans as 0/1.
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()? {
            Value::Bool(b) => Some(*b),
            other => other.as_i64().map(|n| n != 0),
        }
    }

    /// Plain JSON rendering; unassigned cells become `null`.
    pub fn to_value(&self) -> Value {
        match self {
            SolutionValue::Scalar(cell) => cell_value(cell),
            SolutionValue::Sequence(cells) => Value::Array(cells.iter().map(cell_value).collect()),
            SolutionValue::Matrix(rows) => Value::Array(
                rows.iter()
                    .map(|row| Value::Array(row.iter().map(cell_value).collect()))
                    .collect(),
            ),
        }
    }
}

fn cell_value(cell: &Cell) -> Value {
    cell.clone().unwrap_or(Value::Null)
}

/// Splits a row-major sequence into `rows` rows of `cols` cells.
///
/// Missing trailing cells are padded with `None`; cells past `rows * cols`
/// are dropped. Cell `(r, c)` is `flat[r * cols + c]`.
pub fn unflatten<T: Clone>(flat: &[Option<T>], rows: usize, cols: usize) -> Vec<Vec<Option<T>>> {
    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| flat.get(r * cols + c).cloned().flatten())
                .collect()
        })
        .collect()
}

/// Row-major concatenation; inverse of [`unflatten`] for exact-size input.
pub fn flatten<T: Clone>(matrix: &[Vec<Option<T>>]) -> Vec<Option<T>> {
    matrix.iter().flat_map(|row| row.iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_unflatten_row_major() {
        let flat: Vec<Option<i32>> = (1..=6).map(Some).collect();
        let matrix = unflatten(&flat, 2, 3);
        assert_eq!(
            matrix,
            vec![
                vec![Some(1), Some(2), Some(3)],
                vec![Some(4), Some(5), Some(6)]
            ]
        );
    }

    #[test]
    fn test_unflatten_pads_short_input() {
        let flat = vec![Some(1), None, Some(3)];
        let matrix = unflatten(&flat, 2, 2);
        assert_eq!(matrix, vec![vec![Some(1), None], vec![Some(3), None]]);
    }

    #[test]
    fn test_unflatten_drops_overflow() {
        let flat: Vec<Option<i32>> = (0..5).map(Some).collect();
        assert_eq!(unflatten(&flat, 2, 2), vec![vec![Some(0), Some(1)], vec![Some(2), Some(3)]]);
    }

    #[test]
    fn test_bool_accessor_reads_integers() {
        assert_eq!(SolutionValue::Scalar(Some(json!(1))).as_bool(), Some(true));
        assert_eq!(SolutionValue::Scalar(Some(json!(0))).as_bool(), Some(false));
        assert_eq!(SolutionValue::Scalar(Some(json!(true))).as_bool(), Some(true));
        assert_eq!(SolutionValue::Scalar(None).as_bool(), None);
    }

    #[test]
    fn test_to_value_uses_null_for_unassigned() {
        let value = SolutionValue::Matrix(vec![vec![Some(json!(1)), None]]);
        assert_eq!(value.to_value(), json!([[1, null]]));
    }

    proptest! {
        #[test]
        fn prop_flatten_inverts_unflatten(
            rows in 1usize..6,
            cols in 1usize..6,
            seed in proptest::collection::vec(proptest::option::of(-100i64..100), 36),
        ) {
            let flat: Vec<Option<i64>> = seed[..rows * cols].to_vec();
            let matrix = unflatten(&flat, rows, cols);
            prop_assert_eq!(matrix.len(), rows);
            for (r, row) in matrix.iter().enumerate() {
                prop_assert_eq!(row.len(), cols);
                for (c, cell) in row.iter().enumerate() {
                    prop_assert_eq!(cell, &flat[r * cols + c]);
                }
            }
            prop_assert_eq!(flatten(&matrix), flat);
        }
    }
}
