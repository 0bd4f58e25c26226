//! JSON output of a resolved address plan.

use crate::error::{Error, Result};
use crate::models::AddressPlan;
use serde::Serialize;

/// Render the plan as pretty-printed JSON.
pub fn plan_to_json(plan: &AddressPlan) -> Result<String> {
    to_pretty_json(plan, "address plan")
}

fn to_pretty_json<T: Serialize + ?Sized>(value: &T, what: &str) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Output(format!("Error serializing {what}: {e}")))
}
