//! Branching strategies and the value kinds that accept them.

use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::variable::ValueKind;

macro_rules! strategy_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|strategy| strategy.as_str() == s)
                    .ok_or_else(|| {
                        ModelError::config(format!(
                            "unknown {} strategy '{}'",
                            stringify!($name),
                            s
                        ))
                    })
            }
        }
    };
}

strategy_enum! {
    /// Which value the search tries first for the branched variable.
    #[derive(Default)]
    BranchValue {
        #[default]
        Random => "VAL_RND",
        Min => "VAL_MIN",
        Median => "VAL_MED",
        Max => "VAL_MAX",
        ValuesMin => "VALUES_MIN",
        ValuesMax => "VALUES_MAX",
        RangeMin => "VAL_RANGE_MIN",
        RangeMax => "VAL_RANGE_MAX",
        SplitMin => "VAL_SPLIT_MIN",
        SplitMax => "VAL_SPLIT_MAX",
    }
}

strategy_enum! {
    /// Which array slot the search branches on next.
    #[derive(Default)]
    BranchVariable {
        NoPreference => "VAR_NONE",
        #[default]
        Random => "VAR_RND",
        SizeMin => "VAR_SIZE_MIN",
        SizeMax => "VAR_SIZE_MAX",
        RegretMinMin => "VAR_REGRET_MIN_MIN",
        RegretMinMax => "VAR_REGRET_MIN_MAX",
        DegreeMin => "VAR_DEGREE_MIN",
        DegreeMax => "VAR_DEGREE_MAX",
        MinMin => "VAR_MIN_MIN",
        MinMax => "VAR_MIN_MAX",
        MaxMin => "VAR_MAX_MIN",
        MaxMax => "VAR_MAX_MAX",
        DegreeSizeMin => "VAR_DEGREE_SIZE_MIN",
        DegreeSizeMax => "VAR_DEGREE_SIZE_MAX",
    }
}

impl BranchValue {
    /// Whether the engine offers this strategy for `kind`.
    pub fn supports(&self, kind: ValueKind) -> bool {
        use BranchValue::*;
        match kind {
            ValueKind::Integer => true,
            ValueKind::Float => matches!(self, Random | Min | Max | SplitMin | SplitMax),
            ValueKind::Boolean => matches!(self, Random | Min | Max),
        }
    }
}

impl BranchVariable {
    /// Whether the engine offers this strategy for `kind`.
    pub fn supports(&self, kind: ValueKind) -> bool {
        use BranchVariable::*;
        match kind {
            ValueKind::Integer => true,
            ValueKind::Float => !matches!(self, NoPreference | RegretMinMin | RegretMinMax),
            ValueKind::Boolean => matches!(self, Random | DegreeSizeMin | DegreeSizeMax),
        }
    }
}
