//! Optimization objectives (`specific` entries on the wire).

use serde_json::Value;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, Result, Variable};

use crate::constraint::resolve;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Minimize => "minimize",
            Direction::Maximize => "maximize",
        }
    }
}

/// Minimize or maximize one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Objective {
    variable: String,
    direction: Direction,
}

impl Objective {
    pub fn minimize(variable: &Variable) -> Self {
        Self {
            variable: variable.name().to_string(),
            direction: Direction::Minimize,
        }
    }

    pub fn maximize(variable: &Variable) -> Self {
        Self {
            variable: variable.name().to_string(),
            direction: Direction::Maximize,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn to_wire(&self) -> WireMap {
        let mut map = WireMap::new();
        map.insert("var".into(), Value::from(self.variable.as_str()));
        map.insert("type".into(), Value::from(self.direction.as_str()));
        map
    }

    pub fn from_wire(map: &WireMap, variables: &[Variable]) -> Result<Self> {
        let direction = match wire::str_field(map, "type")? {
            "minimize" => Direction::Minimize,
            "maximize" => Direction::Maximize,
            other => {
                return Err(ModelError::malformed(
                    "type",
                    format!("expected minimize or maximize, got '{other}'"),
                ))
            }
        };
        let variable = resolve(variables, wire::str_field(map, "var")?)?;
        Ok(Self {
            variable: variable.name().to_string(),
            direction,
        })
    }
}
