//! The resolved address plan handed to downstream consumers.

use super::{NodeIpamPlan, ServiceRangeSet};
use serde::Serialize;

/// Resolved cluster address layout.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddressPlan {
    /// Node CIDR allocation inputs, `None` when node CIDR allocation is disabled.
    pub node_ipam: Option<NodeIpamPlan>,
    pub service_ranges: ServiceRangeSet,
}
