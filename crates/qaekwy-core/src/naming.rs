//! Matrix shape carried inside a variable identifier.
//!
//! A matrix is shipped to the engine as a flat array whose name reads
//! `MATRIX$<rows>$<cols>$<basename>`. These two functions are the only
//! place that format is written or parsed.

const MATRIX_PREFIX: &str = "MATRIX$";

/// Shape and base name recovered from a matrix identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixName<'a> {
    pub rows: usize,
    pub cols: usize,
    pub base: &'a str,
}

/// Builds `MATRIX$rows$cols$base`.
pub fn encode_matrix_name(base: &str, rows: usize, cols: usize) -> String {
    format!("{MATRIX_PREFIX}{rows}${cols}${base}")
}

/// Parses a matrix identifier. Returns `None` for anything that is not a
/// well-formed `MATRIX$<rows>$<cols>$<basename>` string.
pub fn decode_matrix_name(name: &str) -> Option<MatrixName<'_>> {
    let rest = name.strip_prefix(MATRIX_PREFIX)?;
    let mut parts = rest.splitn(3, '$');
    let rows = parts.next()?.parse().ok()?;
    let cols = parts.next()?.parse().ok()?;
    let base = parts.next()?;
    Some(MatrixName { rows, cols, base })
}

/// True when `name` starts with the matrix prefix, well-formed or not.
pub fn has_matrix_prefix(name: &str) -> bool {
    name.starts_with(MATRIX_PREFIX)
}
