//! Output formatting for the resolved address plan.
//!
//! - [`json`] - JSON rendering
//! - [`terminal`] - Terminal summary with colors

mod json;
mod terminal;

pub use json::plan_to_json;
pub use terminal::{pad_field, plan_rows, print_plan, PlanRow};
