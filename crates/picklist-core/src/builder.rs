//! Constraint model builder.
//!
//! Translates an [`Inventory`] plus three numeric targets into a complete
//! binary program:
//!
//! - one binary variable per container and per cylinder, in first-seen order;
//! - exact-equality rows for container count, summed volume and summed
//!   weight;
//! - per box: box exclusivity (`S <= 1`) and the Big-M upper link
//!   (`|box| * container - S >= 0`, so an unchosen container disables every
//!   cylinder it holds);
//! - per container: the downward link (`container <= sum of its cylinders`),
//!   enforced once at container granularity rather than per box — per-box
//!   enforcement would require a cylinder in *every* box of a chosen
//!   container, which together with box exclusivity over-constrains the
//!   program.
//!
//! The builder never fails: infeasibility is a property of the targets
//! versus the data and is reported by the solver oracle.

use crate::inventory::Inventory;
use crate::model::{ConstraintOp, Model};

/// The three numeric targets of a selection problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionTargets {
    /// Exact number of containers to select.
    pub container_count: u32,
    /// Exact summed cylinder weight, in grams.
    pub weight: f64,
    /// Exact summed cylinder volume, in mL.
    pub volume: f64,
}

/// Builds the base model for the given inventory and targets.
pub fn build_model(inventory: &Inventory, targets: &SelectionTargets) -> Model {
    let mut model = Model::new();

    // Variables first, grouped by container in first-seen order.
    for container in inventory.containers() {
        model.add_binary(&container.id);
        for &box_idx in &container.boxes {
            for &cylinder_idx in &inventory.boxes()[box_idx].cylinders {
                model.add_binary(&inventory.cylinders()[cylinder_idx].id);
            }
        }
    }

    let container_terms: Vec<_> = inventory
        .containers()
        .iter()
        .filter_map(|c| model.var(&c.id))
        .map(|var| (var, 1.0))
        .collect();
    model.add_constraint(
        "container_count",
        container_terms,
        ConstraintOp::Eq,
        f64::from(targets.container_count),
    );

    let volume_terms: Vec<_> = inventory
        .cylinders()
        .iter()
        .filter_map(|cyl| model.var(&cyl.id).map(|var| (var, cyl.volume)))
        .collect();
    model.add_constraint("total_volume", volume_terms, ConstraintOp::Eq, targets.volume);

    let weight_terms: Vec<_> = inventory
        .cylinders()
        .iter()
        .filter_map(|cyl| model.var(&cyl.id).map(|var| (var, cyl.weight)))
        .collect();
    model.add_constraint("total_weight", weight_terms, ConstraintOp::Eq, targets.weight);

    for container in inventory.containers() {
        let Some(container_var) = model.var(&container.id) else {
            continue;
        };

        for &box_idx in &container.boxes {
            let cyl_box = &inventory.boxes()[box_idx];
            let cylinder_vars: Vec<_> = cyl_box
                .cylinders
                .iter()
                .filter_map(|&idx| model.var(&inventory.cylinders()[idx].id))
                .collect();
            // An empty box contributes S = 0 and both rows hold trivially;
            // it cannot arise from row-based construction but must not fail.
            let big_m = cyl_box.cylinders.len() as f64;

            let mut capacity_terms: Vec<_> = cylinder_vars.iter().map(|&v| (v, 1.0)).collect();
            model.add_constraint(
                format!("box_capacity_{}", cyl_box.id),
                capacity_terms.clone(),
                ConstraintOp::Le,
                1.0,
            );

            // |box| * container - S >= 0
            for term in &mut capacity_terms {
                term.1 = -1.0;
            }
            capacity_terms.insert(0, (container_var, big_m));
            model.add_constraint(
                format!("link_{}", cyl_box.id),
                capacity_terms,
                ConstraintOp::Ge,
                0.0,
            );
        }

        // container <= sum of all its cylinders, across every box.
        let mut cover_terms = vec![(container_var, 1.0)];
        for &box_idx in &container.boxes {
            for &idx in &inventory.boxes()[box_idx].cylinders {
                if let Some(var) = model.var(&inventory.cylinders()[idx].id) {
                    cover_terms.push((var, -1.0));
                }
            }
        }
        model.add_constraint(
            format!("cover_{}", container.id),
            cover_terms,
            ConstraintOp::Le,
            0.0,
        );
    }

    model
}
