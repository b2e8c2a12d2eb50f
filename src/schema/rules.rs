//! Hand-authored constraints layered on top of the inferred shape
//!
//! The examples alone cannot tell which keys are mandatory or which strings
//! are closed sets, so these come from the Palace configuration reference.

use super::types::{SchemaNode, ValueKind};

/// Top-level sections every Palace configuration must have
pub const REQUIRED_SECTIONS: [&str; 5] = ["Problem", "Model", "Domains", "Boundaries", "Solver"];

/// Problem types accepted by `Problem.Type`
pub const PROBLEM_TYPES: [&str; 2] = ["Driven", "Transient"];

/// Frequency sweep types accepted by `Solver.Sweep.Type`
pub const SWEEP_TYPES: [&str; 2] = ["Uniform", "Adaptive"];

/// Apply the Palace rules to an inferred root
pub fn apply_palace_rules(root: &mut SchemaNode) {
    root.require(REQUIRED_SECTIONS);

    root.ensure_path(&["Problem", "Type"]).ensure_enum(PROBLEM_TYPES);
    root.ensure_path(&["Solver", "Sweep", "Type"])
        .ensure_enum(SWEEP_TYPES);
    root.ensure_path(&["Solver", "Excitations"])
        .add_kind(ValueKind::Array);

    root.ensure_path(&["Boundaries", "PostProcessing"])
        .require(["NSample"]);
    root.ensure_path(&["Boundaries", "PostProcessing", "NSample"])
        .add_kind(ValueKind::Number);
}
