//! Exact reference oracle.
//!
//! A deterministic depth-first search over the binary variables in model
//! order, pruning with per-constraint interval bounds (the best and worst
//! the unassigned suffix can still contribute to each row). Returns the
//! first feasible assignment it reaches, so repeated calls on an unchanged
//! model return the same assignment.
//!
//! This is not a production MIP engine; it exists so the search loop is
//! runnable and testable without an external solver. Anything honoring the
//! [`SolverOracle`] contract can replace it.

use picklist_core::{Assignment, Constraint, ConstraintOp, Model, Result, FEASIBILITY_TOLERANCE};

use crate::oracle::{SolveStatus, SolverOracle};

/// Exhaustive branch-and-prune oracle over binary variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveOracle;

impl ExhaustiveOracle {
    pub fn new() -> Self {
        Self
    }
}

impl SolverOracle for ExhaustiveOracle {
    fn solve(&mut self, model: &Model) -> Result<SolveStatus> {
        let mut dfs = Dfs::new(model);
        Ok(match dfs.run() {
            Some(values) => SolveStatus::Optimal(Assignment::new(values)),
            None => SolveStatus::Infeasible,
        })
    }

    fn name(&self) -> &str {
        "exhaustive"
    }
}

struct Dfs<'a> {
    constraints: &'a [Constraint],
    /// Per variable: the rows it appears in, with its coefficient.
    var_rows: Vec<Vec<(usize, f64)>>,
    /// Per row: current left-hand side over assigned variables.
    current: Vec<f64>,
    /// Per row, per depth d: the most the suffix `vars >= d` can still add.
    pos_remaining: Vec<Vec<f64>>,
    /// Per row, per depth d: the least the suffix `vars >= d` can still add.
    neg_remaining: Vec<Vec<f64>>,
    values: Vec<u8>,
}

impl<'a> Dfs<'a> {
    fn new(model: &'a Model) -> Self {
        let n = model.variables().len();
        let constraints = model.constraints();

        let mut var_rows = vec![Vec::new(); n];
        let mut pos_remaining = Vec::with_capacity(constraints.len());
        let mut neg_remaining = Vec::with_capacity(constraints.len());

        for (row, constraint) in constraints.iter().enumerate() {
            let mut pos = vec![0.0; n + 1];
            let mut neg = vec![0.0; n + 1];
            for &(var, coefficient) in &constraint.terms {
                var_rows[var].push((row, coefficient));
                if coefficient > 0.0 {
                    pos[var] += coefficient;
                } else {
                    neg[var] += coefficient;
                }
            }
            for d in (0..n).rev() {
                pos[d] += pos[d + 1];
                neg[d] += neg[d + 1];
            }
            pos_remaining.push(pos);
            neg_remaining.push(neg);
        }

        Self {
            constraints,
            var_rows,
            current: vec![0.0; constraints.len()],
            pos_remaining,
            neg_remaining,
            values: vec![0; n],
        }
    }

    fn run(&mut self) -> Option<Vec<u8>> {
        if self.descend(0) {
            Some(self.values.clone())
        } else {
            None
        }
    }

    fn descend(&mut self, depth: usize) -> bool {
        if depth == self.values.len() {
            return self.all_rows_hold();
        }
        // Branch order is fixed: selected first, then unselected.
        for value in [1u8, 0u8] {
            self.values[depth] = value;
            if value == 1 {
                for &(row, coefficient) in &self.var_rows[depth] {
                    self.current[row] += coefficient;
                }
            }
            if self.rows_can_still_hold(depth + 1) && self.descend(depth + 1) {
                return true;
            }
            if value == 1 {
                for &(row, coefficient) in &self.var_rows[depth] {
                    self.current[row] -= coefficient;
                }
            }
        }
        self.values[depth] = 0;
        false
    }

    /// Interval pruning: a row is dead if even the best suffix completion
    /// cannot satisfy it.
    fn rows_can_still_hold(&self, depth: usize) -> bool {
        self.constraints.iter().enumerate().all(|(row, constraint)| {
            let lo = self.current[row] + self.neg_remaining[row][depth];
            let hi = self.current[row] + self.pos_remaining[row][depth];
            match constraint.op {
                ConstraintOp::Eq => {
                    lo <= constraint.rhs + FEASIBILITY_TOLERANCE
                        && hi >= constraint.rhs - FEASIBILITY_TOLERANCE
                }
                ConstraintOp::Le => lo <= constraint.rhs + FEASIBILITY_TOLERANCE,
                ConstraintOp::Ge => hi >= constraint.rhs - FEASIBILITY_TOLERANCE,
            }
        })
    }

    fn all_rows_hold(&self) -> bool {
        self.constraints.iter().enumerate().all(|(row, constraint)| {
            let lhs = self.current[row];
            match constraint.op {
                ConstraintOp::Eq => (lhs - constraint.rhs).abs() <= FEASIBILITY_TOLERANCE,
                ConstraintOp::Le => lhs <= constraint.rhs + FEASIBILITY_TOLERANCE,
                ConstraintOp::Ge => lhs >= constraint.rhs - FEASIBILITY_TOLERANCE,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_core::Model;

    #[test]
    fn test_finds_exact_sum() {
        let mut model = Model::new();
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        let c = model.add_binary("c");
        model.add_constraint("sum", vec![(a, 2.0), (b, 3.0), (c, 4.0)], ConstraintOp::Eq, 7.0);

        let mut oracle = ExhaustiveOracle::new();
        match oracle.solve(&model).unwrap() {
            SolveStatus::Optimal(assignment) => {
                assert!(model.is_feasible(&assignment));
                assert!(assignment.is_selected(b));
                assert!(assignment.is_selected(c));
                assert!(!assignment.is_selected(a));
            }
            SolveStatus::Infeasible => panic!("expected a feasible assignment"),
        }
    }

    #[test]
    fn test_reports_infeasible() {
        let mut model = Model::new();
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_constraint("sum", vec![(a, 2.0), (b, 4.0)], ConstraintOp::Eq, 5.0);

        let mut oracle = ExhaustiveOracle::new();
        assert_eq!(oracle.solve(&model).unwrap(), SolveStatus::Infeasible);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let mut model = Model::new();
        let vars: Vec<_> = (0..6).map(|i| model.add_binary(&format!("v{i}"))).collect();
        let terms: Vec<_> = vars.iter().map(|&v| (v, 1.0)).collect();
        model.add_constraint("pick_two", terms, ConstraintOp::Eq, 2.0);

        let mut oracle = ExhaustiveOracle::new();
        let first = oracle.solve(&model).unwrap();
        let second = oracle.solve(&model).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_model_is_feasible() {
        let model = Model::new();
        let mut oracle = ExhaustiveOracle::new();
        match oracle.solve(&model).unwrap() {
            SolveStatus::Optimal(assignment) => assert!(assignment.is_empty()),
            SolveStatus::Infeasible => panic!("empty model has the empty assignment"),
        }
    }
}
