//! Arithmetic and transcendental relations between variables.

use qaekwy_core::wire::WireMap;
use qaekwy_core::{ModelError, Numeric, Result, Variable};

use super::{named, resolve_field, wire_name, Constraint, ConstraintKind};

macro_rules! tagged_op {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $tag:literal),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn tag(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)*
                }
            }

            pub fn from_tag(tag: &str) -> Option<$name> {
                match tag {
                    $($tag => Some($name::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

tagged_op! {
    /// Unary function relating two variables.
    MathFunction {
        Abs => "abs",
        Sin => "sin",
        Cos => "cos",
        Tan => "tan",
        Asin => "asin",
        Acos => "acos",
        Atan => "atan",
        Exp => "exp",
        Log => "log",
    }
}

tagged_op! {
    /// Binary operation relating three variables.
    ArithmeticOp {
        Div => "div",
        Mul => "mul",
        Mod => "mod",
        Min => "min",
        Max => "max",
    }
}

tagged_op! {
    /// Power-like operation whose exponent is a literal.
    ExponentOp {
        Pow => "pow",
        NRoot => "nroot",
    }
}

impl Constraint {
    /// `result = function(operand)`
    pub fn math(function: MathFunction, operand: &Variable, result: &Variable) -> Constraint {
        Constraint::new(ConstraintKind::Math {
            function,
            operand: operand.name().to_string(),
            result: result.name().to_string(),
        })
    }

    pub fn abs(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Abs, operand, result)
    }

    pub fn sin(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Sin, operand, result)
    }

    pub fn cos(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Cos, operand, result)
    }

    pub fn tan(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Tan, operand, result)
    }

    pub fn asin(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Asin, operand, result)
    }

    pub fn acos(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Acos, operand, result)
    }

    pub fn atan(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Atan, operand, result)
    }

    pub fn exp(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Exp, operand, result)
    }

    pub fn log(operand: &Variable, result: &Variable) -> Constraint {
        Constraint::math(MathFunction::Log, operand, result)
    }

    /// `result = op(lhs, rhs)`
    pub fn arithmetic(
        op: ArithmeticOp,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> Constraint {
        Constraint::new(ConstraintKind::Arithmetic {
            op,
            lhs: lhs.name().to_string(),
            rhs: rhs.name().to_string(),
            result: result.name().to_string(),
        })
    }

    pub fn divide(lhs: &Variable, rhs: &Variable, result: &Variable) -> Constraint {
        Constraint::arithmetic(ArithmeticOp::Div, lhs, rhs, result)
    }

    pub fn multiply(lhs: &Variable, rhs: &Variable, result: &Variable) -> Constraint {
        Constraint::arithmetic(ArithmeticOp::Mul, lhs, rhs, result)
    }

    pub fn modulo(lhs: &Variable, rhs: &Variable, result: &Variable) -> Constraint {
        Constraint::arithmetic(ArithmeticOp::Mod, lhs, rhs, result)
    }

    pub fn minimum(lhs: &Variable, rhs: &Variable, result: &Variable) -> Constraint {
        Constraint::arithmetic(ArithmeticOp::Min, lhs, rhs, result)
    }

    pub fn maximum(lhs: &Variable, rhs: &Variable, result: &Variable) -> Constraint {
        Constraint::arithmetic(ArithmeticOp::Max, lhs, rhs, result)
    }

    /// `base ^ exponent = result`
    pub fn power(base: &Variable, exponent: impl Into<Numeric>, result: &Variable) -> Constraint {
        Constraint::exponent(ExponentOp::Pow, base, exponent.into(), result)
    }

    /// `exponent`-th root of `base` equals `result`
    pub fn nroot(base: &Variable, exponent: impl Into<Numeric>, result: &Variable) -> Constraint {
        Constraint::exponent(ExponentOp::NRoot, base, exponent.into(), result)
    }

    fn exponent(op: ExponentOp, base: &Variable, exponent: Numeric, result: &Variable) -> Self {
        Constraint::new(ConstraintKind::Exponent {
            op,
            base: base.name().to_string(),
            exponent,
            result: result.name().to_string(),
        })
    }
}

fn unknown(tag: &str) -> ModelError {
    ModelError::UnknownConstraintType(tag.to_string())
}

pub(super) fn math_from_wire(
    tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let function = MathFunction::from_tag(tag).ok_or_else(|| unknown(tag))?;
    let kind = ConstraintKind::Math {
        function,
        operand: resolve_field(map, "v1", variables)?,
        result: resolve_field(map, "v2", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}

pub(super) fn arithmetic_from_wire(
    tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let op = ArithmeticOp::from_tag(tag).ok_or_else(|| unknown(tag))?;
    let kind = ConstraintKind::Arithmetic {
        op,
        lhs: resolve_field(map, "v1", variables)?,
        rhs: resolve_field(map, "v2", variables)?,
        result: resolve_field(map, "v3", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}

pub(super) fn exponent_from_wire(
    tag: &str,
    map: &WireMap,
    variables: &[Variable],
) -> Result<Constraint> {
    let op = ExponentOp::from_tag(tag).ok_or_else(|| unknown(tag))?;
    let exponent = map
        .get("v2")
        .and_then(Numeric::from_value)
        .ok_or_else(|| ModelError::malformed("v2", "expected a numeric exponent"))?;
    let kind = ConstraintKind::Exponent {
        op,
        base: resolve_field(map, "v1", variables)?,
        exponent,
        result: resolve_field(map, "v3", variables)?,
    };
    Ok(named(kind, wire_name(map)?))
}
