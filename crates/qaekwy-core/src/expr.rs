//! Textual expressions in the engine's constraint grammar.
//!
//! An [`Expression`] is never evaluated. Every composition wraps the operand
//! texts into a larger fragment, parenthesized so operator precedence is
//! unambiguous for the engine. Multiplication and conjunction render bare
//! (`a * b`, `a & b`), which is what the engine's grammar expects.
//!
//! Comparisons build text too: `x.gt(5)` is the constraint `((x) > (5))`,
//! not a boolean.
//!
//! ```
//! use qaekwy_core::Expression;
//!
//! let x = Expression::raw("x");
//! let y = Expression::raw("y");
//! let c = (&x + &y).le(10);
//! assert_eq!(c.to_string(), "(((x + y)) <= (10))");
//! ```

use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

/// An immutable fragment of engine expression text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    /// Wraps caller-supplied text verbatim.
    pub fn raw(text: impl Into<String>) -> Self {
        Expression(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// `abs(e)`
    pub fn abs(&self) -> Expression {
        Expression(format!("abs({})", self.0))
    }

    /// `((a) == (b))`
    #[allow(clippy::should_implement_trait)]
    pub fn eq(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare("==", rhs.into())
    }

    /// `((a) != (b))`
    #[allow(clippy::should_implement_trait)]
    pub fn ne(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare("!=", rhs.into())
    }

    /// `((a) < (b))`
    pub fn lt(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare("<", rhs.into())
    }

    /// `((a) <= (b))`
    pub fn le(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare("<=", rhs.into())
    }

    /// `((a) > (b))`
    pub fn gt(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare(">", rhs.into())
    }

    /// `((a) >= (b))`
    pub fn ge(&self, rhs: impl Into<Expression>) -> Expression {
        self.compare(">=", rhs.into())
    }

    fn compare(&self, op: &str, rhs: Expression) -> Expression {
        Expression(format!("(({}) {} ({}))", self.0, op, rhs.0))
    }

    fn binary(lhs: &str, op: BinaryOp, rhs: &str) -> Expression {
        let text = match op {
            BinaryOp::Add => format!("({lhs} + {rhs})"),
            BinaryOp::Sub => format!("({lhs} - {rhs})"),
            BinaryOp::Mul => format!("{lhs} * {rhs}"),
            BinaryOp::Div => format!("(({lhs}) / ({rhs}))"),
            BinaryOp::Rem => format!("(({lhs}) % ({rhs}))"),
            BinaryOp::And => format!("{lhs} & {rhs}"),
            BinaryOp::Or => format!("({lhs} | {rhs})"),
            BinaryOp::Xor => format!("(({lhs}) ^ ({rhs}))"),
        };
        Expression(text)
    }
}

#[derive(Clone, Copy)]
enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Expression {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Operand conversions

impl From<&Expression> for Expression {
    fn from(expr: &Expression) -> Self {
        expr.clone()
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression(text.to_string())
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression(text)
    }
}

macro_rules! int_operand {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Expression {
                fn from(value: $t) -> Self {
                    Expression(value.to_string())
                }
            }
        )*
    };
}

int_operand!(i32, i64, u32, u64, usize);

impl From<f64> for Expression {
    fn from(value: f64) -> Self {
        // Debug keeps the fractional part (`2.0`, not `2`).
        Expression(format!("{value:?}"))
    }
}

impl From<bool> for Expression {
    fn from(value: bool) -> Self {
        Expression::raw(if value { "True" } else { "False" })
    }
}

// Operator syntax; each impl exists for owned and borrowed left operands.

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<R: Into<Expression>> $trait<R> for Expression {
            type Output = Expression;

            fn $method(self, rhs: R) -> Expression {
                Expression::binary(&self.0, $op, &rhs.into().0)
            }
        }

        impl<R: Into<Expression>> $trait<R> for &Expression {
            type Output = Expression;

            fn $method(self, rhs: R) -> Expression {
                Expression::binary(&self.0, $op, &rhs.into().0)
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);
binary_operator!(Rem, rem, BinaryOp::Rem);
binary_operator!(BitAnd, bitand, BinaryOp::And);
binary_operator!(BitOr, bitor, BinaryOp::Or);
binary_operator!(BitXor, bitxor, BinaryOp::Xor);

// Scalars on the left: `3 * x` renders as `3 * x`.
macro_rules! scalar_left_operand {
    ($($t:ty),*) => {
        $(
            impl Add<Expression> for $t {
                type Output = Expression;

                fn add(self, rhs: Expression) -> Expression {
                    Expression::binary(&Expression::from(self).0, BinaryOp::Add, &rhs.0)
                }
            }

            impl Sub<Expression> for $t {
                type Output = Expression;

                fn sub(self, rhs: Expression) -> Expression {
                    Expression::binary(&Expression::from(self).0, BinaryOp::Sub, &rhs.0)
                }
            }

            impl Mul<Expression> for $t {
                type Output = Expression;

                fn mul(self, rhs: Expression) -> Expression {
                    Expression::binary(&Expression::from(self).0, BinaryOp::Mul, &rhs.0)
                }
            }

            impl Div<Expression> for $t {
                type Output = Expression;

                fn div(self, rhs: Expression) -> Expression {
                    Expression::binary(&Expression::from(self).0, BinaryOp::Div, &rhs.0)
                }
            }

            impl Rem<Expression> for $t {
                type Output = Expression;

                fn rem(self, rhs: Expression) -> Expression {
                    Expression::binary(&Expression::from(self).0, BinaryOp::Rem, &rhs.0)
                }
            }
        )*
    };
}

scalar_left_operand!(i32, i64, f64);

impl Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression(format!("!({})", self.0))
    }
}

impl Not for &Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression(format!("!({})", self.0))
    }
}

impl Neg for Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression(format!("(-1) * ({})", self.0))
    }
}

impl Neg for &Expression {
    type Output = Expression;

    fn neg(self) -> Expression {
        Expression(format!("(-1) * ({})", self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expression {
        Expression::raw("x")
    }

    fn y() -> Expression {
        Expression::raw("y")
    }

    #[test]
    fn test_arithmetic_rendering() {
        assert_eq!((x() + y()).to_string(), "(x + y)");
        assert_eq!((x() - 1).to_string(), "(x - 1)");
        assert_eq!((x() * y()).to_string(), "x * y");
        assert_eq!((x() / 2).to_string(), "((x) / (2))");
        assert_eq!((x() % 3).to_string(), "((x) % (3))");
    }

    #[test]
    fn test_boolean_rendering() {
        assert_eq!((x() & y()).to_string(), "x & y");
        assert_eq!((x() | y()).to_string(), "(x | y)");
        assert_eq!((x() ^ y()).to_string(), "((x) ^ (y))");
        assert_eq!((!x()).to_string(), "!(x)");
    }

    #[test]
    fn test_unary_rendering() {
        assert_eq!((-x()).to_string(), "(-1) * (x)");
        assert_eq!(x().abs().to_string(), "abs(x)");
    }

    #[test]
    fn test_comparisons_build_text() {
        assert_eq!(x().eq(5).to_string(), "((x) == (5))");
        assert_eq!(x().ne(&y()).to_string(), "((x) != (y))");
        assert_eq!(x().lt(1).to_string(), "((x) < (1))");
        assert_eq!(x().le(1).to_string(), "((x) <= (1))");
        assert_eq!(x().gt(1).to_string(), "((x) > (1))");
        assert_eq!(x().ge(1).to_string(), "((x) >= (1))");
    }

    #[test]
    fn test_scalar_left_operands() {
        assert_eq!((3_i32 * x()).to_string(), "3 * x");
        assert_eq!((10_i32 - x()).to_string(), "(10 - x)");
        assert_eq!((1.5 + x()).to_string(), "(1.5 + x)");
    }

    #[test]
    fn test_float_operand_keeps_fraction() {
        assert_eq!((x() + 2.0).to_string(), "(x + 2.0)");
    }

    #[test]
    fn test_bool_operand() {
        assert_eq!(x().eq(true).to_string(), "((x) == (True))");
    }

    #[test]
    fn test_composition_is_nested() {
        let expr = (&x() + &y()).le(10) & x().gt(0);
        assert_eq!(expr.to_string(), "(((x + y)) <= (10)) & ((x) > (0))");
    }

    #[test]
    fn test_borrowed_operands_leave_inputs_untouched() {
        let a = x();
        let b = y();
        let _ = &a + &b;
        assert_eq!(a.as_str(), "x");
        assert_eq!(b.as_str(), "y");
    }
}
