//! Picklist Core - Entity hierarchy and model types for cylinder selection
//!
//! This crate provides the fundamental building blocks for picklist:
//! - The container/box/cylinder inventory hierarchy
//! - Linear model types (binary variables, constraints, assignments)
//! - The model builder that encodes a selection problem as a binary program

pub mod builder;
pub mod error;
pub mod inventory;
pub mod model;


pub use builder::{build_model, SelectionTargets};
pub use error::{PicklistError, Result};
pub use inventory::{
    box_id, box_part, container_part, cylinder_id, is_container_id, Container, Cylinder,
    CylinderBox, InputRow, Inventory, ID_SEPARATOR,
};
pub use model::{
    round_to, Assignment, Constraint, ConstraintOp, Model, VarId, VarKind, Variable,
    FEASIBILITY_TOLERANCE,
};
