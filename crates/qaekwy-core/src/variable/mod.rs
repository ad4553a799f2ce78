//! Decision variables.
//!
//! A [`Variable`] is a scalar, an array or a matrix of integer, float or
//! boolean values. All three share one struct; [`VariableKind`] carries the
//! shape-specific fields. Variables are created through [`VariableBuilder`]
//! and referenced from constraints by name only.

mod branch;
mod builder;
mod vector;
mod wire;

#[cfg(test)]
mod tests;

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use serde_json::Value;

use crate::expr::Expression;

pub use branch::{BranchValue, BranchVariable};
pub use builder::VariableBuilder;
pub use vector::{Cells, VectorSelection, VectorView};

/// Element type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Float,
    Boolean,
}

impl ValueKind {
    /// Wire tag for a scalar of this kind.
    pub fn scalar_tag(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        }
    }

    /// Wire tag for an array (or matrix) of this kind.
    pub fn array_tag(&self) -> &'static str {
        match self {
            ValueKind::Integer => "integer_array",
            ValueKind::Float => "float_array",
            ValueKind::Boolean => "boolean_array",
        }
    }

    /// Parses a `varset` value; anything unrecognized reads as integer.
    pub fn from_varset(varset: &str) -> ValueKind {
        match varset.to_ascii_lowercase().as_str() {
            "boolean" => ValueKind::Boolean,
            "float" => ValueKind::Float,
            _ => ValueKind::Integer,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scalar_tag())
    }
}

/// A domain bound or enumerated domain value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    pub fn to_value(self) -> Value {
        match self {
            Numeric::Int(v) => Value::from(v),
            Numeric::Float(v) => Value::from(v),
        }
    }

    /// Reads an integer if the number has no fractional part on the wire.
    pub fn from_value(value: &Value) -> Option<Numeric> {
        if let Some(v) = value.as_i64() {
            Some(Numeric::Int(v))
        } else {
            value.as_f64().map(Numeric::Float)
        }
    }
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<i32> for Numeric {
    fn from(v: i32) -> Self {
        Numeric::Int(v.into())
    }
}

impl From<f64> for Numeric {
    fn from(v: f64) -> Self {
        Numeric::Float(v)
    }
}

impl From<bool> for Numeric {
    fn from(v: bool) -> Self {
        Numeric::Int(v.into())
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{v}"),
            Numeric::Float(v) => write!(f, "{v:?}"),
        }
    }
}

/// The set of values a variable may take.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Domain {
    /// Left to the engine's default for the kind.
    #[default]
    Unrestricted,
    /// Inclusive `[low, high]`.
    Bounds { low: Numeric, high: Numeric },
    /// An explicit list of allowed values.
    Specific(Vec<Numeric>),
    /// The variable is defined as the value of an expression. Scalars only.
    Expression(Expression),
}

/// Shape-specific part of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableKind {
    Scalar,
    Array {
        length: usize,
        brancher_variable: BranchVariable,
    },
    Matrix {
        rows: usize,
        cols: usize,
        brancher_variable: BranchVariable,
    },
}

/// A decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub(crate) name: String,
    pub(crate) value_kind: ValueKind,
    pub(crate) kind: VariableKind,
    pub(crate) domain: Domain,
    pub(crate) brancher_value: BranchValue,
    pub(crate) branching_order: i64,
}

/// Branching order meaning "no preference".
pub const NO_BRANCHING_ORDER: i64 = -1;

impl Variable {
    pub fn integer(name: impl Into<String>) -> VariableBuilder {
        VariableBuilder::new(name, ValueKind::Integer, VariableKind::Scalar)
    }

    pub fn float(name: impl Into<String>) -> VariableBuilder {
        VariableBuilder::new(name, ValueKind::Float, VariableKind::Scalar)
    }

    pub fn boolean(name: impl Into<String>) -> VariableBuilder {
        VariableBuilder::new(name, ValueKind::Boolean, VariableKind::Scalar)
    }

    pub fn integer_array(name: impl Into<String>, length: usize) -> VariableBuilder {
        VariableBuilder::array(name, ValueKind::Integer, length)
    }

    pub fn float_array(name: impl Into<String>, length: usize) -> VariableBuilder {
        VariableBuilder::array(name, ValueKind::Float, length)
    }

    pub fn boolean_array(name: impl Into<String>, length: usize) -> VariableBuilder {
        VariableBuilder::array(name, ValueKind::Boolean, length)
    }

    pub fn integer_matrix(name: impl Into<String>, rows: usize, cols: usize) -> VariableBuilder {
        VariableBuilder::matrix(name, ValueKind::Integer, rows, cols)
    }

    pub fn float_matrix(name: impl Into<String>, rows: usize, cols: usize) -> VariableBuilder {
        VariableBuilder::matrix(name, ValueKind::Float, rows, cols)
    }

    pub fn boolean_matrix(name: impl Into<String>, rows: usize, cols: usize) -> VariableBuilder {
        VariableBuilder::matrix(name, ValueKind::Boolean, rows, cols)
    }

    /// Wire identifier. Matrices carry their `MATRIX$` prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn brancher_value(&self) -> BranchValue {
        self.brancher_value
    }

    /// Slot selection strategy; `None` for scalars.
    pub fn brancher_variable(&self) -> Option<BranchVariable> {
        match self.kind {
            VariableKind::Scalar => None,
            VariableKind::Array {
                brancher_variable, ..
            }
            | VariableKind::Matrix {
                brancher_variable, ..
            } => Some(brancher_variable),
        }
    }

    pub fn branching_order(&self) -> i64 {
        self.branching_order
    }

    /// The one attribute that may change after construction.
    pub fn set_branching_order(&mut self, order: i64) {
        self.branching_order = order;
    }

    /// Wire `type` tag; matrices use the array tag.
    pub fn type_tag(&self) -> &'static str {
        match self.kind {
            VariableKind::Scalar => self.value_kind.scalar_tag(),
            _ => self.value_kind.array_tag(),
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, VariableKind::Scalar)
    }

    /// True for arrays and matrices.
    pub fn is_array(&self) -> bool {
        !self.is_scalar()
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self.kind, VariableKind::Matrix { .. })
    }

    /// Number of cells; 1 for a scalar.
    pub fn len(&self) -> usize {
        match self.kind {
            VariableKind::Scalar => 1,
            VariableKind::Array { length, .. } => length,
            VariableKind::Matrix { rows, cols, .. } => rows * cols,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(rows, cols)` of the cell grid. Arrays read as a single row.
    pub fn grid(&self) -> (usize, usize) {
        match self.kind {
            VariableKind::Scalar => (1, 1),
            VariableKind::Array { length, .. } => (1, length),
            VariableKind::Matrix { rows, cols, .. } => (rows, cols),
        }
    }

    /// The variable as an expression operand.
    pub fn expr(&self) -> Expression {
        Expression::raw(self.name.clone())
    }

    /// `name[index]` over the flattened cells.
    pub fn at(&self, index: usize) -> Expression {
        Expression::raw(format!("{}[{}]", self.name, index))
    }

    /// Row-major cell access: `name[row * cols + col]`.
    pub fn cell(&self, row: usize, col: usize) -> Expression {
        let (_, cols) = self.grid();
        self.at(row * cols + col)
    }

    /// `sum(name)`
    pub fn sum(&self) -> Expression {
        Expression::raw(format!("sum({})", self.name))
    }

    /// `min(name)`
    pub fn min(&self) -> Expression {
        Expression::raw(format!("min({})", self.name))
    }

    /// `max(name)`
    pub fn max(&self) -> Expression {
        Expression::raw(format!("max({})", self.name))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&Variable> for Expression {
    fn from(variable: &Variable) -> Self {
        variable.expr()
    }
}

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::raw(variable.name)
    }
}

// `&x + 1` composes exactly like `x.expr() + 1`.
macro_rules! variable_operator {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl<R: Into<Expression>> $trait<R> for &Variable {
                type Output = Expression;

                fn $method(self, rhs: R) -> Expression {
                    self.expr().$method(rhs)
                }
            }
        )*
    };
}

variable_operator!(
    Add::add,
    Sub::sub,
    Mul::mul,
    Div::div,
    Rem::rem,
    BitAnd::bitand,
    BitOr::bitor,
    BitXor::bitxor
);

impl Not for &Variable {
    type Output = Expression;

    fn not(self) -> Expression {
        !self.expr()
    }
}

impl Neg for &Variable {
    type Output = Expression;

    fn neg(self) -> Expression {
        -self.expr()
    }
}
