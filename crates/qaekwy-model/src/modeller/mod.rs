//! The Modeller: one model document's variables, constraints, objectives
//! and solve settings.
//!
//! `serialize(false)` produces an inspection document that may lack a
//! searcher. `serialize(true)` produces the submittable document and
//! fails with [`ModelError::MissingSearchStrategy`] when none was chosen.

#[cfg(test)]
mod tests;

use std::fmt;

use serde_json::Value;
use tracing::debug;

use qaekwy_core::wire::{self, WireMap};
use qaekwy_core::{ModelError, NameGenerator, Result, SearcherType, SequentialNames, Variable};

use crate::constraint::Constraint;
use crate::cutoff::Cutoff;
use crate::objective::Objective;

/// Default number of solutions requested from the engine.
pub const DEFAULT_SOLUTION_LIMIT: u32 = 1;

pub struct Modeller {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objectives: Vec<Objective>,
    searcher: Option<SearcherType>,
    cutoff: Option<Cutoff>,
    callback_url: Option<String>,
    solution_limit: u32,
    names: Box<dyn NameGenerator>,
}

impl Default for Modeller {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Modeller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Modeller")
            .field("variables", &self.variables)
            .field("constraints", &self.constraints)
            .field("objectives", &self.objectives)
            .field("searcher", &self.searcher)
            .field("cutoff", &self.cutoff)
            .field("callback_url", &self.callback_url)
            .field("solution_limit", &self.solution_limit)
            .finish_non_exhaustive()
    }
}

impl Modeller {
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objectives: Vec::new(),
            searcher: None,
            cutoff: None,
            callback_url: None,
            solution_limit: DEFAULT_SOLUTION_LIMIT,
            names: Box::new(SequentialNames::default()),
        }
    }

    /// Replaces the generator used to name unnamed constraints.
    pub fn with_name_generator(mut self, names: impl NameGenerator + 'static) -> Self {
        self.names = Box::new(names);
        self
    }

    pub fn add_variable(&mut self, variable: Variable) -> &mut Self {
        self.variables.push(variable);
        self
    }

    /// Adds a constraint, naming it first if it has no name.
    pub fn add_constraint(&mut self, mut constraint: Constraint) -> &mut Self {
        if constraint.name().is_none() {
            let name = self.fresh_constraint_name();
            constraint = constraint.with_name(name);
        }
        self.constraints.push(constraint);
        self
    }

    /// Next generated name that no constraint in the model already uses.
    ///
    /// Gives up after one attempt more than there are constraints; a
    /// generator that never repeats itself always lands on a free name by then.
    fn fresh_constraint_name(&mut self) -> String {
        let mut name = self.names.next_name();
        for _ in 0..self.constraints.len() {
            if !self.constraint_name_taken(&name) {
                break;
            }
            name = self.names.next_name();
        }
        name
    }

    fn constraint_name_taken(&self, name: &str) -> bool {
        self.constraints.iter().any(|c| c.name() == Some(name))
    }

    pub fn add_objective(&mut self, objective: Objective) -> &mut Self {
        self.objectives.push(objective);
        self
    }

    pub fn set_searcher(&mut self, searcher: SearcherType) -> &mut Self {
        self.searcher = Some(searcher);
        self
    }

    pub fn set_cutoff(&mut self, cutoff: Cutoff) -> &mut Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn clear_cutoff(&mut self) -> &mut Self {
        self.cutoff = None;
        self
    }

    pub fn set_callback_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.callback_url = Some(url.into());
        self
    }

    pub fn set_solution_limit(&mut self, limit: u32) -> &mut Self {
        self.solution_limit = limit;
        self
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn searcher(&self) -> Option<SearcherType> {
        self.searcher
    }

    pub fn cutoff(&self) -> Option<&Cutoff> {
        self.cutoff.as_ref()
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }

    pub fn solution_limit(&self) -> u32 {
        self.solution_limit
    }

    /// Finds a variable by its wire name.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    /// Builds the model document. `final_document` adds the searcher and
    /// requires one to be set.
    pub fn serialize(&self, final_document: bool) -> Result<WireMap> {
        if self.solution_limit == 0 {
            return Err(ModelError::config("solution_limit must be at least 1"));
        }
        let searcher = match (final_document, self.searcher) {
            (true, None) => return Err(ModelError::MissingSearchStrategy),
            (true, Some(searcher)) => Some(searcher),
            (false, _) => None,
        };

        debug!(
            variables = self.variables.len(),
            constraints = self.constraints.len(),
            objectives = self.objectives.len(),
            final_document,
            "Serializing model"
        );

        let mut map = WireMap::new();
        map.insert("var".into(), wire_list(&self.variables, Variable::to_wire));
        map.insert(
            "constraint".into(),
            wire_list(&self.constraints, Constraint::to_wire),
        );
        map.insert(
            "specific".into(),
            wire_list(&self.objectives, Objective::to_wire),
        );
        map.insert("solution_limit".into(), Value::from(self.solution_limit));
        if let Some(searcher) = searcher {
            map.insert("searcher".into(), Value::from(searcher.as_str()));
        }
        if let Some(cutoff) = &self.cutoff {
            map.insert(cutoff.model_key().into(), Value::Object(cutoff.to_wire()));
        }
        if let Some(url) = &self.callback_url {
            map.insert("callback_url".into(), Value::from(url.as_str()));
        }
        Ok(map)
    }

    /// Rebuilds a model from its document.
    ///
    /// Variables are restored scalars first, then arrays, then matrices, so
    /// every constraint and objective can resolve the names it references.
    pub fn deserialize(map: &WireMap) -> Result<Modeller> {
        let mut scalars = Vec::new();
        let mut arrays = Vec::new();
        let mut matrices = Vec::new();
        for entry in wire::opt_array_field(map, "var")? {
            let var_map = wire::as_map(entry, "var")?;
            let variable = Variable::from_wire(var_map)?;
            if variable.is_matrix() {
                matrices.push(variable);
            } else if variable.is_array() {
                arrays.push(variable);
            } else {
                scalars.push(variable);
            }
        }

        let mut model = Modeller::new();
        model.variables = scalars;
        model.variables.append(&mut arrays);
        model.variables.append(&mut matrices);

        for entry in wire::opt_array_field(map, "constraint")? {
            let constraint_map = wire::as_map(entry, "constraint")?;
            let constraint = Constraint::from_wire(constraint_map, &model.variables)?;
            model.constraints.push(constraint);
        }
        for entry in wire::opt_array_field(map, "specific")? {
            let objective_map = wire::as_map(entry, "specific")?;
            let objective = Objective::from_wire(objective_map, &model.variables)?;
            model.objectives.push(objective);
        }

        if let Some(limit) = wire::opt_i64_field(map, "solution_limit")? {
            model.solution_limit = u32::try_from(limit)
                .ok()
                .filter(|limit| *limit >= 1)
                .ok_or_else(|| {
                    ModelError::malformed("solution_limit", format!("expected >= 1, got {limit}"))
                })?;
        }
        if let Some(text) = wire::opt_str_field(map, "searcher")? {
            let searcher = text.parse::<SearcherType>().map_err(|_| {
                ModelError::malformed("searcher", format!("unknown searcher '{text}'"))
            })?;
            model.searcher = Some(searcher);
        }
        model.cutoff = match (map.get("cutoff"), map.get("meta_cutoff")) {
            (Some(_), Some(_)) => {
                return Err(ModelError::malformed(
                    "cutoff",
                    "cutoff and meta_cutoff are mutually exclusive",
                ))
            }
            (Some(value), None) => Some(Cutoff::from_wire(wire::as_map(value, "cutoff")?)?),
            (None, Some(value)) => Some(Cutoff::from_wire(wire::as_map(value, "meta_cutoff")?)?),
            (None, None) => None,
        };
        model.callback_url = wire::opt_str_field(map, "callback_url")?.map(str::to_string);

        debug!(
            variables = model.variables.len(),
            constraints = model.constraints.len(),
            objectives = model.objectives.len(),
            "Deserialized model"
        );
        Ok(model)
    }

    /// Serializes to JSON text.
    pub fn to_json_string(&self, final_document: bool) -> Result<String> {
        let map = self.serialize(final_document)?;
        serde_json::to_string(&map).map_err(|e| ModelError::malformed("model", e.to_string()))
    }

    /// Parses a JSON model document.
    pub fn from_json_string(text: &str) -> Result<Modeller> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| ModelError::malformed("model", e.to_string()))?;
        Modeller::deserialize(wire::as_map(&value, "model")?)
    }
}

fn wire_list<T>(items: &[T], to_wire: fn(&T) -> WireMap) -> Value {
    Value::Array(items.iter().map(|item| Value::Object(to_wire(item))).collect())
}
