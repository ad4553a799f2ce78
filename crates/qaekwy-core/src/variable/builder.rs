//! Fluent construction of variables with build-time validation.

use crate::error::{ModelError, Result};
use crate::expr::Expression;
use crate::naming::{decode_matrix_name, encode_matrix_name, has_matrix_prefix};

use super::{
    BranchValue, BranchVariable, Domain, Numeric, ValueKind, Variable, VariableKind,
    NO_BRANCHING_ORDER,
};

/// Builder returned by the `Variable::integer*` / `float*` / `boolean*`
/// constructors.
///
/// ```
/// use qaekwy_core::Variable;
///
/// let x = Variable::integer("x").bounds(0, 10).build().unwrap();
/// assert_eq!(x.name(), "x");
///
/// let grid = Variable::integer_matrix("grid", 3, 3).bounds(1, 9).build().unwrap();
/// assert_eq!(grid.name(), "MATRIX$3$3$grid");
/// ```
#[derive(Debug, Clone)]
pub struct VariableBuilder {
    name: String,
    value_kind: ValueKind,
    kind: VariableKind,
    domain: Domain,
    domain_conflict: bool,
    brancher_value: BranchValue,
    brancher_variable: BranchVariable,
    branching_order: i64,
}

impl VariableBuilder {
    pub(crate) fn new(name: impl Into<String>, value_kind: ValueKind, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            value_kind,
            kind,
            domain: Domain::Unrestricted,
            domain_conflict: false,
            brancher_value: BranchValue::default(),
            brancher_variable: BranchVariable::default(),
            branching_order: NO_BRANCHING_ORDER,
        }
    }

    pub(crate) fn array(name: impl Into<String>, value_kind: ValueKind, length: usize) -> Self {
        Self::new(
            name,
            value_kind,
            VariableKind::Array {
                length,
                brancher_variable: BranchVariable::default(),
            },
        )
    }

    pub(crate) fn matrix(
        name: impl Into<String>,
        value_kind: ValueKind,
        rows: usize,
        cols: usize,
    ) -> Self {
        Self::new(
            name,
            value_kind,
            VariableKind::Matrix {
                rows,
                cols,
                brancher_variable: BranchVariable::default(),
            },
        )
    }

    fn set_domain(mut self, domain: Domain) -> Self {
        if !matches!(self.domain, Domain::Unrestricted) {
            self.domain_conflict = true;
        }
        self.domain = domain;
        self
    }

    /// Inclusive bounds.
    pub fn bounds(self, low: impl Into<Numeric>, high: impl Into<Numeric>) -> Self {
        self.set_domain(Domain::Bounds {
            low: low.into(),
            high: high.into(),
        })
    }

    /// An explicit list of allowed values.
    pub fn specific_domain<I, N>(self, values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Numeric>,
    {
        self.set_domain(Domain::Specific(
            values.into_iter().map(Into::into).collect(),
        ))
    }

    /// Defines a scalar as the value of `expr`.
    pub fn expression(self, expr: impl Into<Expression>) -> Self {
        self.set_domain(Domain::Expression(expr.into()))
    }

    pub fn brancher_value(mut self, strategy: BranchValue) -> Self {
        self.brancher_value = strategy;
        self
    }

    /// Ignored by `build` on scalars, which have no slots to select.
    pub fn brancher_variable(mut self, strategy: BranchVariable) -> Self {
        self.brancher_variable = strategy;
        self
    }

    pub fn branching_order(mut self, order: i64) -> Self {
        self.branching_order = order;
        self
    }

    pub fn build(self) -> Result<Variable> {
        if self.name.is_empty() {
            return Err(ModelError::config("variable name must not be empty"));
        }
        if self.domain_conflict {
            return Err(ModelError::config(format!(
                "variable '{}' was given more than one of bounds, specific domain and expression",
                self.name
            )));
        }
        if !self.brancher_value.supports(self.value_kind) {
            return Err(ModelError::config(format!(
                "value strategy {} is not available for {} variables",
                self.brancher_value, self.value_kind
            )));
        }

        let brancher_variable = self.brancher_variable;
        let (name, kind) = match self.kind {
            VariableKind::Scalar => (self.name, VariableKind::Scalar),
            VariableKind::Array { length, .. } => {
                if length == 0 {
                    return Err(ModelError::config(format!(
                        "array '{}' must have a positive length",
                        self.name
                    )));
                }
                (
                    self.name,
                    VariableKind::Array {
                        length,
                        brancher_variable,
                    },
                )
            }
            VariableKind::Matrix { rows, cols, .. } => {
                if rows == 0 || cols == 0 {
                    return Err(ModelError::config(format!(
                        "matrix '{}' must have positive dimensions, got {rows}x{cols}",
                        self.name
                    )));
                }
                (
                    matrix_identifier(&self.name, rows, cols)?,
                    VariableKind::Matrix {
                        rows,
                        cols,
                        brancher_variable,
                    },
                )
            }
        };

        if !matches!(kind, VariableKind::Scalar) {
            if matches!(self.domain, Domain::Expression(_)) {
                return Err(ModelError::config(format!(
                    "'{name}' is an array; only scalars can be defined by an expression"
                )));
            }
            if !brancher_variable.supports(self.value_kind) {
                return Err(ModelError::config(format!(
                    "variable strategy {} is not available for {} arrays",
                    brancher_variable, self.value_kind
                )));
            }
        }

        Ok(Variable {
            name,
            value_kind: self.value_kind,
            kind,
            domain: self.domain,
            brancher_value: self.brancher_value,
            branching_order: self.branching_order,
        })
    }
}

/// Resolves the wire identifier for a `rows x cols` matrix.
///
/// A plain base name gets the prefix. An already-prefixed name is kept only
/// when its encoded shape matches.
pub(crate) fn matrix_identifier(name: &str, rows: usize, cols: usize) -> Result<String> {
    if !has_matrix_prefix(name) {
        return Ok(encode_matrix_name(name, rows, cols));
    }
    match decode_matrix_name(name) {
        Some(parsed) if parsed.rows == rows && parsed.cols == cols => Ok(name.to_string()),
        Some(parsed) => Err(ModelError::config(format!(
            "'{name}' encodes a {}x{} matrix but {rows}x{cols} was declared; pass the base name instead",
            parsed.rows, parsed.cols
        ))),
        None => Err(ModelError::config(format!(
            "'{name}' starts with MATRIX$ but is not a valid matrix identifier"
        ))),
    }
}
