//! The container/box/cylinder inventory hierarchy.
//!
//! A strict three-level containment tree: containers own boxes, boxes own
//! cylinders. Containers and cylinders each carry one binary decision
//! variable in the model; boxes do not — their selection state is derived.
//!
//! Entities live in arena-style vectors on [`Inventory`]; parent→children
//! edges are index lists and child→parent back-references are plain indices,
//! so navigation is read-only and cycle-free.

use std::collections::HashMap;

use serde::Deserialize;

/// Separator used to derive box and cylinder identifiers from their parents.
///
/// A container identifier contains no separator, a box identifier contains
/// at least one, a cylinder identifier at least two. The identifier shape is
/// therefore a canonical encoding of tree position, which the validator
/// relies on to partition raw variable assignments.
pub const ID_SEPARATOR: char = '-';

/// One input record: a single cylinder together with the labels of the box
/// and container it sits in.
///
/// Row order defines first-seen discovery order for containers and boxes,
/// which in turn fixes variable and constraint enumeration order.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRow {
    /// Container label (also the container identifier).
    pub container: String,
    /// Box label, local to the container.
    pub box_label: String,
    /// Cylinder label, local to the box.
    pub cylinder_label: String,
    /// Mass in grams.
    pub weight: f64,
    /// Volume in mL.
    pub volume: f64,
    /// Informational only; never used in constraints.
    #[serde(default)]
    pub density: f64,
}

/// A container: the top level of the tree. Carries a decision variable.
#[derive(Debug, Clone)]
pub struct Container {
    /// Globally unique identifier.
    pub id: String,
    /// Indices of owned boxes, in first-seen order.
    pub boxes: Vec<usize>,
}

/// A box inside a container. Carries no decision variable.
#[derive(Debug, Clone)]
pub struct CylinderBox {
    /// Unique identifier: `container_id + '-' + box_label`.
    pub id: String,
    /// Back-reference to the owning container.
    pub container: usize,
    /// Indices of owned cylinders, in input order.
    pub cylinders: Vec<usize>,
}

/// A cylinder inside a box. Carries a decision variable.
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// Unique identifier: `box_id + '-' + cylinder_label`.
    pub id: String,
    /// Back-reference to the owning box.
    pub owner: usize,
    /// Mass in grams.
    pub weight: f64,
    /// Volume in mL.
    pub volume: f64,
    /// Informational only.
    pub density: f64,
}

/// Derives a box identifier from its container and local label.
pub fn box_id(container_id: &str, box_label: &str) -> String {
    format!("{container_id}{ID_SEPARATOR}{box_label}")
}

/// Derives a cylinder identifier from its box and local label.
pub fn cylinder_id(box_id: &str, cylinder_label: &str) -> String {
    format!("{box_id}{ID_SEPARATOR}{cylinder_label}")
}

/// Returns true if the identifier has container shape (no separator).
pub fn is_container_id(id: &str) -> bool {
    !id.contains(ID_SEPARATOR)
}

/// Returns the container part of a box or cylinder identifier.
pub fn container_part(id: &str) -> &str {
    id.split(ID_SEPARATOR).next().unwrap_or(id)
}

/// Returns the box part of a cylinder identifier (everything before the
/// last separator).
pub fn box_part(id: &str) -> &str {
    match id.rfind(ID_SEPARATOR) {
        Some(pos) => &id[..pos],
        None => id,
    }
}

/// In-memory inventory built from input rows.
///
/// Construction is idempotent with respect to container and box identifiers:
/// re-encountering an identifier reuses the existing entity. Every row
/// always creates a new cylinder — rows are never merged.
///
/// # Example
///
/// ```
/// use picklist_core::{InputRow, Inventory};
///
/// let mut inventory = Inventory::new();
/// inventory.add_row(&InputRow {
///     container: "A".into(),
///     box_label: "1".into(),
///     cylinder_label: "1".into(),
///     weight: 5.0,
///     volume: 1.0,
///     density: 5.0,
/// });
///
/// assert_eq!(inventory.containers().len(), 1);
/// assert_eq!(inventory.cylinders()[0].id, "A-1-1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    containers: Vec<Container>,
    boxes: Vec<CylinderBox>,
    cylinders: Vec<Cylinder>,
    container_index: HashMap<String, usize>,
    box_index: HashMap<String, usize>,
    cylinder_index: HashMap<String, usize>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from a sequence of input rows.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a InputRow>) -> Self {
        let mut inventory = Self::new();
        for row in rows {
            inventory.add_row(row);
        }
        inventory
    }

    /// Adds one input row, creating or reusing the container and box it
    /// names and always appending a fresh cylinder.
    pub fn add_row(&mut self, row: &InputRow) {
        let container_idx = self.get_or_create_container(&row.container);
        let box_idx = self.get_or_create_box(container_idx, &row.box_label);

        let id = cylinder_id(&self.boxes[box_idx].id, &row.cylinder_label);
        let cylinder_idx = self.cylinders.len();
        self.cylinders.push(Cylinder {
            id: id.clone(),
            owner: box_idx,
            weight: row.weight,
            volume: row.volume,
            density: row.density,
        });
        self.cylinder_index.insert(id, cylinder_idx);
        self.boxes[box_idx].cylinders.push(cylinder_idx);
    }

    fn get_or_create_container(&mut self, id: &str) -> usize {
        if let Some(&idx) = self.container_index.get(id) {
            return idx;
        }
        let idx = self.containers.len();
        self.containers.push(Container {
            id: id.to_owned(),
            boxes: Vec::new(),
        });
        self.container_index.insert(id.to_owned(), idx);
        idx
    }

    fn get_or_create_box(&mut self, container_idx: usize, box_label: &str) -> usize {
        let id = box_id(&self.containers[container_idx].id, box_label);
        if let Some(&idx) = self.box_index.get(&id) {
            return idx;
        }
        let idx = self.boxes.len();
        self.boxes.push(CylinderBox {
            id: id.clone(),
            container: container_idx,
            cylinders: Vec::new(),
        });
        self.box_index.insert(id, idx);
        self.containers[container_idx].boxes.push(idx);
        idx
    }

    /// All containers, in first-seen order.
    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// All boxes, in first-seen order.
    pub fn boxes(&self) -> &[CylinderBox] {
        &self.boxes
    }

    /// All cylinders, in input order.
    pub fn cylinders(&self) -> &[Cylinder] {
        &self.cylinders
    }

    /// Looks up a cylinder by identifier.
    pub fn cylinder(&self, id: &str) -> Option<&Cylinder> {
        self.cylinder_index.get(id).map(|&idx| &self.cylinders[idx])
    }

    /// Looks up a box by identifier.
    pub fn cylinder_box(&self, id: &str) -> Option<&CylinderBox> {
        self.box_index.get(id).map(|&idx| &self.boxes[idx])
    }

    /// Looks up a container by identifier.
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.container_index.get(id).map(|&idx| &self.containers[idx])
    }

    /// Returns the container that owns the given cylinder.
    pub fn container_of(&self, cylinder: &Cylinder) -> &Container {
        &self.containers[self.boxes[cylinder.owner].container]
    }

    /// Returns the box that owns the given cylinder.
    pub fn box_of(&self, cylinder: &Cylinder) -> &CylinderBox {
        &self.boxes[cylinder.owner]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(container: &str, box_label: &str, cylinder_label: &str) -> InputRow {
        InputRow {
            container: container.into(),
            box_label: box_label.into(),
            cylinder_label: cylinder_label.into(),
            weight: 1.0,
            volume: 1.0,
            density: 1.0,
        }
    }

    #[test]
    fn test_identifier_derivation() {
        assert_eq!(box_id("A", "1"), "A-1");
        assert_eq!(cylinder_id("A-1", "2"), "A-1-2");
        assert!(is_container_id("A"));
        assert!(!is_container_id("A-1"));
        assert_eq!(container_part("A-1-2"), "A");
        assert_eq!(box_part("A-1-2"), "A-1");
    }

    #[test]
    fn test_container_and_box_are_reused() {
        let rows = [row("A", "1", "1"), row("A", "1", "2"), row("A", "2", "1")];
        let inventory = Inventory::from_rows(&rows);

        assert_eq!(inventory.containers().len(), 1);
        assert_eq!(inventory.boxes().len(), 2);
        assert_eq!(inventory.cylinders().len(), 3);
        assert_eq!(inventory.containers()[0].boxes, vec![0, 1]);
        assert_eq!(inventory.boxes()[0].cylinders, vec![0, 1]);
    }

    #[test]
    fn test_every_row_creates_a_distinct_cylinder() {
        // Same labels twice: still two cylinders, never merged.
        let rows = [row("A", "1", "1"), row("A", "1", "1")];
        let inventory = Inventory::from_rows(&rows);
        assert_eq!(inventory.cylinders().len(), 2);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let rows = [row("B", "1", "1"), row("A", "1", "1"), row("B", "2", "1")];
        let inventory = Inventory::from_rows(&rows);

        let ids: Vec<&str> = inventory.containers().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        let box_ids: Vec<&str> = inventory.boxes().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(box_ids, vec!["B-1", "A-1", "B-2"]);
    }

    #[test]
    fn test_back_references() {
        let rows = [row("A", "1", "1"), row("B", "1", "1")];
        let inventory = Inventory::from_rows(&rows);

        let cylinder = inventory.cylinder("B-1-1").unwrap();
        assert_eq!(inventory.box_of(cylinder).id, "B-1");
        assert_eq!(inventory.container_of(cylinder).id, "B");
    }
}
