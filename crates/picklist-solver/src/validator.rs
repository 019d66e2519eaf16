//! Independent solution validation.
//!
//! The validator deliberately does not trust the solver: Big-M links are
//! easy to get subtly wrong, so every structural and numeric invariant is
//! re-derived from first principles on the raw assignment. Rejection is an
//! expected, recoverable outcome and is reported as `None`, never as an
//! error.

use std::collections::{HashMap, HashSet};

use picklist_core::{
    box_part, container_part, is_container_id, round_to, Assignment, Cylinder, Inventory, Model,
    SelectionTargets,
};

/// An accepted solution: the ordered selected cylinders plus the containers
/// they pull in.
#[derive(Debug, Clone)]
pub struct AcceptedSolution {
    /// Selected cylinder identifiers, in assignment order.
    pub cylinder_ids: Vec<String>,
    /// Selected container identifiers, in assignment order.
    pub container_ids: Vec<String>,
    /// The selected cylinder records.
    pub cylinders: Vec<Cylinder>,
}

impl AcceptedSolution {
    /// Canonical duplicate-suppression key: the ordered, newline-joined
    /// cylinder identifier list. Also the persisted wire format.
    pub fn key(&self) -> String {
        self.cylinder_ids.join("\n")
    }

    /// Summed weight of the selected cylinders.
    pub fn total_weight(&self) -> f64 {
        self.cylinders.iter().map(|c| c.weight).sum()
    }

    /// Summed volume of the selected cylinders.
    pub fn total_volume(&self) -> f64 {
        self.cylinders.iter().map(|c| c.volume).sum()
    }
}

/// Re-checks candidate assignments against the full constraint set and
/// suppresses duplicates across one search run.
///
/// The seen-set accumulates monotonically for the validator's lifetime and
/// is never pruned.
#[derive(Debug, Default)]
pub struct SolutionValidator {
    precision: u32,
    seen: HashSet<String>,
}

impl SolutionValidator {
    /// Creates a validator rounding to the given number of decimal digits.
    pub fn new(precision: u32) -> Self {
        Self {
            precision,
            seen: HashSet::new(),
        }
    }

    /// Number of solutions accepted so far.
    pub fn accepted_count(&self) -> usize {
        self.seen.len()
    }

    /// Validates a raw assignment. Returns the accepted solution, or `None`
    /// if any structural, numeric or duplicate check fails.
    pub fn validate(
        &mut self,
        inventory: &Inventory,
        model: &Model,
        assignment: &Assignment,
        targets: &SelectionTargets,
    ) -> Option<AcceptedSolution> {
        // Partition selected variables by identifier shape: containers have
        // no separator, cylinders at least one.
        let mut container_ids: Vec<String> = Vec::new();
        let mut cylinder_ids: Vec<String> = Vec::new();
        for name in assignment.selected_names(model) {
            if is_container_id(name) {
                container_ids.push(name.to_owned());
            } else {
                cylinder_ids.push(name.to_owned());
            }
        }

        let selected_containers: HashSet<&str> =
            container_ids.iter().map(String::as_str).collect();
        let mut cylinders: Vec<Cylinder> = Vec::with_capacity(cylinder_ids.len());
        let mut used_boxes: HashMap<&str, &str> = HashMap::new();
        let mut covered_containers: HashSet<&str> = HashSet::new();

        for id in &cylinder_ids {
            let Some(cylinder) = inventory.cylinder(id) else {
                tracing::debug!(event = "reject", reason = "unknown_cylinder", cylinder = %id);
                return None;
            };

            // Upward consistency: the owning container must be selected.
            let container = container_part(id);
            if !selected_containers.contains(container) {
                tracing::debug!(
                    event = "reject",
                    reason = "container_not_selected",
                    cylinder = %id,
                );
                return None;
            }
            covered_containers.insert(container);

            // Box exclusivity: at most one selected cylinder per box.
            let owning_box = box_part(id);
            if let Some(other) = used_boxes.insert(owning_box, id) {
                tracing::debug!(
                    event = "reject",
                    reason = "box_shared",
                    cylinder = %id,
                    conflicting = %other,
                );
                return None;
            }

            cylinders.push(cylinder.clone());
        }

        // Downward consistency: every selected container holds a selected
        // cylinder.
        for container in &container_ids {
            if !covered_containers.contains(container.as_str()) {
                tracing::debug!(
                    event = "reject",
                    reason = "empty_container",
                    container = %container,
                );
                return None;
            }
        }

        let candidate = AcceptedSolution {
            cylinder_ids,
            container_ids,
            cylinders,
        };

        if self.seen.contains(&candidate.key()) {
            tracing::debug!(event = "reject", reason = "duplicate");
            return None;
        }

        // Numeric targets, compared after rounding.
        if candidate.container_ids.len() != targets.container_count as usize {
            tracing::debug!(
                event = "reject",
                reason = "container_count",
                selected = candidate.container_ids.len(),
                expected = targets.container_count,
            );
            return None;
        }
        let volume = round_to(candidate.total_volume(), self.precision);
        if volume != round_to(targets.volume, self.precision) {
            tracing::debug!(event = "reject", reason = "volume", actual = volume);
            return None;
        }
        let weight = round_to(candidate.total_weight(), self.precision);
        if weight != round_to(targets.weight, self.precision) {
            tracing::debug!(event = "reject", reason = "weight", actual = weight);
            return None;
        }

        self.seen.insert(candidate.key());
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picklist_core::{build_model, InputRow, Inventory};

    fn row(container: &str, box_label: &str, cylinder_label: &str, weight: f64, volume: f64) -> InputRow {
        InputRow {
            container: container.into(),
            box_label: box_label.into(),
            cylinder_label: cylinder_label.into(),
            weight,
            volume,
            density: weight / volume,
        }
    }

    fn fixture() -> (Inventory, SelectionTargets) {
        let inventory = Inventory::from_rows(&[
            row("A", "1", "1", 5.0, 2.0),
            row("A", "1", "2", 5.0, 1.0),
            row("B", "1", "1", 5.0, 1.0),
        ]);
        let targets = SelectionTargets {
            container_count: 2,
            weight: 10.0,
            volume: 2.0,
        };
        (inventory, targets)
    }

    fn assignment_for(model: &picklist_core::Model, selected: &[&str]) -> Assignment {
        let values = model
            .variables()
            .iter()
            .map(|v| u8::from(selected.contains(&v.name.as_str())))
            .collect();
        Assignment::new(values)
    }

    #[test]
    fn test_accepts_exact_combination() {
        let (inventory, targets) = fixture();
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "A-1-2", "B", "B-1-1"]);
        let solution = validator
            .validate(&inventory, &model, &assignment, &targets)
            .expect("the exact combination must validate");

        assert_eq!(solution.cylinder_ids, vec!["A-1-2", "B-1-1"]);
        assert_eq!(solution.container_ids, vec!["A", "B"]);
        assert_eq!(solution.total_weight(), 10.0);
        assert_eq!(solution.total_volume(), 2.0);
    }

    #[test]
    fn test_rejects_volume_mismatch() {
        let (inventory, targets) = fixture();
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        // A-1-1 has volume 2.0, overshooting the 2.0 target with B-1-1.
        let assignment = assignment_for(&model, &["A", "A-1-1", "B", "B-1-1"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_none());
    }

    #[test]
    fn test_rejects_unselected_container() {
        let (inventory, targets) = fixture();
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "A-1-2", "B-1-1"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_none());
    }

    #[test]
    fn test_rejects_cylinderless_container() {
        let (inventory, targets) = fixture();
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "B", "B-1-1"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_none());
    }

    #[test]
    fn test_rejects_shared_box() {
        let inventory = Inventory::from_rows(&[
            row("A", "1", "1", 5.0, 1.0),
            row("A", "1", "2", 5.0, 1.0),
        ]);
        let targets = SelectionTargets {
            container_count: 1,
            weight: 10.0,
            volume: 2.0,
        };
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "A-1-1", "A-1-2"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_none());
    }

    #[test]
    fn test_rejects_duplicate_of_accepted() {
        let (inventory, targets) = fixture();
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "A-1-2", "B", "B-1-1"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_some());
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_none());
        assert_eq!(validator.accepted_count(), 1);
    }

    #[test]
    fn test_rounding_tolerates_float_noise() {
        let inventory = Inventory::from_rows(&[
            row("A", "1", "1", 0.1, 0.1),
            row("B", "1", "1", 0.2, 0.2),
        ]);
        // 0.1 + 0.2 != 0.3 exactly; at two digits it must still match.
        let targets = SelectionTargets {
            container_count: 2,
            weight: 0.3,
            volume: 0.3,
        };
        let model = build_model(&inventory, &targets);
        let mut validator = SolutionValidator::new(2);

        let assignment = assignment_for(&model, &["A", "A-1-1", "B", "B-1-1"]);
        assert!(validator
            .validate(&inventory, &model, &assignment, &targets)
            .is_some());
    }
}
