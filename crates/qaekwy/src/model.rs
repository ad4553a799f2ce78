//! One-stop model building and solving.
//!
//! [`Model`] pairs a [`Modeller`] with an [`Engine`]: create variables,
//! add constraints and objectives, then call [`Model::solve`].

use qaekwy_core::{
    Expression, ModelError, SearcherType, ValueKind, Variable, VariableBuilder, VectorView,
};
use qaekwy_model::{Constraint, Cutoff, Modeller, Objective};
use qaekwy_solution::{Solution, SolutionResponse};

use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::transport::Transport;

/// What a distinctness constraint can range over.
#[derive(Debug, Clone, Copy)]
pub enum DistinctTarget<'a> {
    /// Every cell of an array or matrix.
    Whole(&'a Variable),
    /// A row, column or slice of a matrix.
    View(VectorView<'a>),
}

impl<'a> From<&'a Variable> for DistinctTarget<'a> {
    fn from(variable: &'a Variable) -> Self {
        DistinctTarget::Whole(variable)
    }
}

impl<'a> From<VectorView<'a>> for DistinctTarget<'a> {
    fn from(view: VectorView<'a>) -> Self {
        DistinctTarget::View(view)
    }
}

/// A model bound to an engine.
#[derive(Debug)]
pub struct Model<T> {
    modeller: Modeller,
    engine: Engine<T>,
}

impl<T: Transport> Model<T> {
    pub fn new(transport: T) -> Self {
        Self::with_modeller(Modeller::new(), transport)
    }

    pub fn with_modeller(modeller: Modeller, transport: T) -> Self {
        Self {
            modeller,
            engine: Engine::new(transport),
        }
    }

    /// Rebuilds a model from a JSON document.
    pub fn from_json(text: &str, transport: T) -> Result<Self> {
        Ok(Self::with_modeller(Modeller::from_json_string(text)?, transport))
    }

    /// Inspection document; the searcher appears only if one was set.
    pub fn to_json(&self) -> Result<String> {
        Ok(self.modeller.to_json_string(false)?)
    }

    pub fn modeller(&self) -> &Modeller {
        &self.modeller
    }

    pub fn modeller_mut(&mut self) -> &mut Modeller {
        &mut self.modeller
    }

    pub fn engine(&self) -> &Engine<T> {
        &self.engine
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Builds and adds any variable; returns a handle for expressions.
    pub fn variable(&mut self, builder: VariableBuilder) -> Result<Variable> {
        let variable = builder.build()?;
        self.modeller.add_variable(variable.clone());
        Ok(variable)
    }

    pub fn integer_variable(&mut self, name: &str, low: i64, high: i64) -> Result<Variable> {
        self.variable(Variable::integer(name).bounds(low, high))
    }

    /// Integer variable defined by an expression over other variables.
    pub fn integer_expression(
        &mut self,
        name: &str,
        expr: impl Into<Expression>,
    ) -> Result<Variable> {
        self.variable(Variable::integer(name).expression(expr))
    }

    pub fn integer_array(
        &mut self,
        name: &str,
        length: usize,
        low: i64,
        high: i64,
    ) -> Result<Variable> {
        self.variable(Variable::integer_array(name, length).bounds(low, high))
    }

    pub fn integer_matrix(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
        low: i64,
        high: i64,
    ) -> Result<Variable> {
        self.variable(Variable::integer_matrix(name, rows, cols).bounds(low, high))
    }

    pub fn float_variable(&mut self, name: &str, low: f64, high: f64) -> Result<Variable> {
        self.variable(Variable::float(name).bounds(low, high))
    }

    pub fn float_expression(
        &mut self,
        name: &str,
        expr: impl Into<Expression>,
    ) -> Result<Variable> {
        self.variable(Variable::float(name).expression(expr))
    }

    pub fn float_array(
        &mut self,
        name: &str,
        length: usize,
        low: f64,
        high: f64,
    ) -> Result<Variable> {
        self.variable(Variable::float_array(name, length).bounds(low, high))
    }

    pub fn float_matrix(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
    ) -> Result<Variable> {
        self.variable(Variable::float_matrix(name, rows, cols).bounds(low, high))
    }

    pub fn boolean_variable(&mut self, name: &str) -> Result<Variable> {
        self.variable(Variable::boolean(name))
    }

    pub fn boolean_array(&mut self, name: &str, length: usize) -> Result<Variable> {
        self.variable(Variable::boolean_array(name, length))
    }

    pub fn boolean_matrix(&mut self, name: &str, rows: usize, cols: usize) -> Result<Variable> {
        self.variable(Variable::boolean_matrix(name, rows, cols))
    }

    // ------------------------------------------------------------------
    // Constraints
    // ------------------------------------------------------------------

    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.modeller.add_constraint(constraint);
        self
    }

    /// Relational constraint over integer variables.
    pub fn constraint(&mut self, expr: impl Into<Expression>) -> &mut Self {
        self.add_constraint(Constraint::relational(expr))
    }

    /// Relational constraint whose variables are of `kind`.
    pub fn constraint_over(&mut self, expr: impl Into<Expression>, kind: ValueKind) -> &mut Self {
        self.add_constraint(Constraint::relational(expr).over(kind))
    }

    pub fn constraint_if_then(
        &mut self,
        condition: impl Into<Expression>,
        then: impl Into<Expression>,
    ) -> &mut Self {
        self.add_constraint(Constraint::if_then(condition, then))
    }

    pub fn constraint_if_then_else(
        &mut self,
        condition: impl Into<Expression>,
        then: impl Into<Expression>,
        otherwise: impl Into<Expression>,
    ) -> &mut Self {
        self.add_constraint(Constraint::if_then_else(condition, then, otherwise))
    }

    /// All-different over an array, a whole matrix, or a matrix view.
    pub fn constraint_distinct<'a>(
        &mut self,
        target: impl Into<DistinctTarget<'a>>,
    ) -> Result<&mut Self> {
        let constraint = match target.into() {
            DistinctTarget::Whole(variable) => Constraint::distinct(variable)?,
            DistinctTarget::View(view) => Constraint::distinct_view(&view)?,
        };
        Ok(self.add_constraint(constraint))
    }

    pub fn constraint_abs(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::abs(operand, result))
    }

    pub fn constraint_sin(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::sin(operand, result))
    }

    pub fn constraint_cos(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::cos(operand, result))
    }

    pub fn constraint_tan(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::tan(operand, result))
    }

    pub fn constraint_asin(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::asin(operand, result))
    }

    pub fn constraint_acos(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::acos(operand, result))
    }

    pub fn constraint_atan(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::atan(operand, result))
    }

    pub fn constraint_exponential(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::exp(operand, result))
    }

    pub fn constraint_logarithm(&mut self, operand: &Variable, result: &Variable) -> &mut Self {
        self.add_constraint(Constraint::log(operand, result))
    }

    /// `result = lhs / rhs`
    pub fn constraint_divide(
        &mut self,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::divide(lhs, rhs, result))
    }

    /// `result = lhs * rhs`
    pub fn constraint_multiply(
        &mut self,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::multiply(lhs, rhs, result))
    }

    /// `result = lhs % rhs`
    pub fn constraint_modulo(
        &mut self,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::modulo(lhs, rhs, result))
    }

    pub fn constraint_minimum(
        &mut self,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::minimum(lhs, rhs, result))
    }

    pub fn constraint_maximum(
        &mut self,
        lhs: &Variable,
        rhs: &Variable,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::maximum(lhs, rhs, result))
    }

    /// `result = base ^ exponent`
    pub fn constraint_power(
        &mut self,
        base: &Variable,
        exponent: i64,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::power(base, exponent, result))
    }

    /// `result = base ^ (1 / exponent)`
    pub fn constraint_nroot(
        &mut self,
        base: &Variable,
        exponent: i64,
        result: &Variable,
    ) -> &mut Self {
        self.add_constraint(Constraint::nroot(base, exponent, result))
    }

    /// `value` is one of the cells of `array`.
    pub fn constraint_member(&mut self, array: &Variable, value: &Variable) -> Result<&mut Self> {
        let constraint = Constraint::member(array, value)?;
        Ok(self.add_constraint(constraint))
    }

    /// `array[index] == value`
    pub fn constraint_element(
        &mut self,
        array: &Variable,
        index: &Variable,
        value: &Variable,
    ) -> Result<&mut Self> {
        let constraint = Constraint::element(array, index, value)?;
        Ok(self.add_constraint(constraint))
    }

    pub fn constraint_sorted(&mut self, array: &Variable) -> Result<&mut Self> {
        let constraint = Constraint::sorted(array)?;
        Ok(self.add_constraint(constraint))
    }

    pub fn constraint_reverse_sorted(&mut self, array: &Variable) -> Result<&mut Self> {
        let constraint = Constraint::reverse_sorted(array)?;
        Ok(self.add_constraint(constraint))
    }

    // ------------------------------------------------------------------
    // Objectives and solving
    // ------------------------------------------------------------------

    pub fn minimize(&mut self, variable: &Variable) -> &mut Self {
        self.modeller.add_objective(Objective::minimize(variable));
        self
    }

    pub fn maximize(&mut self, variable: &Variable) -> &mut Self {
        self.modeller.add_objective(Objective::maximize(variable));
        self
    }

    /// Submits the model and returns every solution the engine found.
    ///
    /// `cutoff` replaces any cutoff set earlier; `None` clears it.
    pub fn solve(
        &mut self,
        searcher: SearcherType,
        solution_limit: u32,
        cutoff: Option<Cutoff>,
    ) -> Result<Vec<Solution>> {
        if solution_limit == 0 {
            return Err(ModelError::config("solution_limit must be greater than 0").into());
        }
        self.modeller
            .set_searcher(searcher)
            .set_solution_limit(solution_limit);
        match cutoff {
            Some(cutoff) => self.modeller.set_cutoff(cutoff),
            None => self.modeller.clear_cutoff(),
        };

        let response = SolutionResponse::new(self.engine.submit(&self.modeller)?);
        if !response.response().is_ok() {
            let envelope = response.response();
            return Err(EngineError::Solver {
                status: envelope.status().to_string(),
                message: envelope.message().to_string(),
                content: envelope.content().clone(),
            });
        }
        Ok(response.solutions()?.unwrap_or_default())
    }

    /// Submits the model asking for a single solution.
    pub fn solve_one(
        &mut self,
        searcher: SearcherType,
        cutoff: Option<Cutoff>,
    ) -> Result<Option<Solution>> {
        Ok(self.solve(searcher, 1, cutoff)?.into_iter().next())
    }
}
