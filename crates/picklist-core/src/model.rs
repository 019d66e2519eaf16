//! Linear model types for the binary selection program.
//!
//! A [`Model`] is a plain list of binary variables and linear constraints
//! with a constant-zero objective: the program is a pure feasibility
//! problem, so any feasible point is acceptable. Variables and constraints
//! keep insertion order, which makes repeated solves against an unchanged
//! oracle reproducible.

use std::collections::HashMap;
use std::fmt;

/// Dense variable index into a model.
pub type VarId = usize;

/// Tolerance used when checking whether a floating-point constraint row is
/// satisfied exactly.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Rounds a value to the given number of decimal digits, half away from
/// zero.
///
/// # Example
///
/// ```
/// use picklist_core::round_to;
///
/// assert_eq!(round_to(1.239, 2), 1.24);
/// assert_eq!(round_to(2.4449, 2), 2.44);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Kind of a decision variable. Only binary variables exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// 0/1 variable: "is this entity selected".
    Binary,
}

/// A decision variable.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Unique name; the entity identifier it stands for.
    pub name: String,
    /// Variable kind.
    pub kind: VarKind,
}

/// Comparison operator of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Left-hand side equals the right-hand side.
    Eq,
    /// Left-hand side is at most the right-hand side.
    Le,
    /// Left-hand side is at least the right-hand side.
    Ge,
}

/// One linear constraint: `sum(coefficient * variable) op rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Name, for diagnostics.
    pub name: String,
    /// Sparse terms as (variable, coefficient) pairs.
    pub terms: Vec<(VarId, f64)>,
    /// Comparison operator.
    pub op: ConstraintOp,
    /// Right-hand side.
    pub rhs: f64,
}

impl Constraint {
    /// Evaluates the left-hand side under the given assignment.
    pub fn lhs_value(&self, assignment: &Assignment) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coefficient)| coefficient * f64::from(assignment.value(var)))
            .sum()
    }

    /// Returns true if the row holds under the assignment, within
    /// [`FEASIBILITY_TOLERANCE`].
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        let lhs = self.lhs_value(assignment);
        match self.op {
            ConstraintOp::Eq => (lhs - self.rhs).abs() <= FEASIBILITY_TOLERANCE,
            ConstraintOp::Le => lhs <= self.rhs + FEASIBILITY_TOLERANCE,
            ConstraintOp::Ge => lhs >= self.rhs - FEASIBILITY_TOLERANCE,
        }
    }
}

/// A complete binary program: variables, constraints, zero objective.
///
/// The model is mutated in place by the search loop, which appends one
/// exclusion constraint per accepted solution. No other component reads it
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    index: HashMap<String, VarId>,
    constraints: Vec<Constraint>,
    exclusion_count: usize,
}

impl Model {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binary variable, or returns the existing one of that name.
    pub fn add_binary(&mut self, name: &str) -> VarId {
        if let Some(&var) = self.index.get(name) {
            return var;
        }
        let var = self.variables.len();
        self.variables.push(Variable {
            name: name.to_owned(),
            kind: VarKind::Binary,
        });
        self.index.insert(name.to_owned(), var);
        var
    }

    /// Looks up a variable by name.
    pub fn var(&self, name: &str) -> Option<VarId> {
        self.index.get(name).copied()
    }

    /// All variables, in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// All constraints, in insertion order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Appends a constraint row.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) {
        self.constraints.push(Constraint {
            name: name.into(),
            terms,
            op,
            rhs,
        });
    }

    /// Forbids re-selecting the given variable set in full: appends
    /// `sum(vars) <= len - 1`, forcing the next solve to differ by at least
    /// one variable.
    pub fn exclude_selection(&mut self, vars: &[VarId]) {
        self.exclusion_count += 1;
        let terms = vars.iter().map(|&var| (var, 1.0)).collect();
        self.constraints.push(Constraint {
            name: format!("exclusion_{}", self.exclusion_count),
            terms,
            op: ConstraintOp::Le,
            rhs: vars.len() as f64 - 1.0,
        });
    }

    /// Returns true if the assignment satisfies every constraint.
    pub fn is_feasible(&self, assignment: &Assignment) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} variables, {} constraints", self.variables.len(), self.constraints.len())?;
        for constraint in &self.constraints {
            let op = match constraint.op {
                ConstraintOp::Eq => "=",
                ConstraintOp::Le => "<=",
                ConstraintOp::Ge => ">=",
            };
            let lhs: Vec<String> = constraint
                .terms
                .iter()
                .map(|&(var, c)| format!("{}*{}", c, self.variables[var].name))
                .collect();
            writeln!(f, "  {}: {} {} {}", constraint.name, lhs.join(" + "), op, constraint.rhs)?;
        }
        Ok(())
    }
}

/// A raw 0/1 assignment, dense and parallel to the model's variable order.
///
/// Iteration order over selected variables is therefore the model's
/// first-seen order — "order of discovery in the assignment".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<u8>,
}

impl Assignment {
    /// Wraps a dense value vector.
    pub fn new(values: Vec<u8>) -> Self {
        Self { values }
    }

    /// Number of variables covered.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the assignment covers no variables.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of the given variable.
    pub fn value(&self, var: VarId) -> u8 {
        self.values[var]
    }

    /// True if the variable is set to 1.
    pub fn is_selected(&self, var: VarId) -> bool {
        self.values[var] == 1
    }

    /// Names of selected variables, in model order.
    pub fn selected_names<'a>(&'a self, model: &'a Model) -> impl Iterator<Item = &'a str> {
        model
            .variables()
            .iter()
            .enumerate()
            .filter(|&(var, _)| self.is_selected(var))
            .map(|(_, v)| v.name.as_str())
    }
}
