//! Raw address configuration, as supplied by the operator.

use serde::{Deserialize, Serialize};

/// Unvalidated address configuration values.
///
/// Mask sizes use 0 for "not configured".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RawAddressConfig {
    /// Comma-separated pod network CIDRs (1 or 2 entries).
    #[serde(rename = "clusterCIDR")]
    pub cluster_cidr: String,
    /// Comma-separated service CIDRs (0, 1 or 2 entries).
    #[serde(rename = "serviceCIDR")]
    pub service_cidr: String,
    /// Legacy node mask size, single-stack clusters only.
    #[serde(rename = "nodeCIDRMaskSize")]
    pub node_cidr_mask_size: u32,
    #[serde(rename = "nodeCIDRMaskSizeIPv4")]
    pub node_cidr_mask_size_ipv4: u32,
    #[serde(rename = "nodeCIDRMaskSizeIPv6")]
    pub node_cidr_mask_size_ipv6: u32,
    /// Resolve node IPAM inputs at all.
    #[serde(rename = "allocateNodeCIDRs")]
    pub allocate_node_cidrs: bool,
}

impl Default for RawAddressConfig {
    fn default() -> Self {
        RawAddressConfig {
            cluster_cidr: "".to_string(),
            service_cidr: "".to_string(),
            node_cidr_mask_size: 0,
            node_cidr_mask_size_ipv4: 0,
            node_cidr_mask_size_ipv6: 0,
            allocate_node_cidrs: true,
        }
    }
}
