//! Cardinality and dual-stack pairing checks for cluster CIDRs.

use super::cidr_list::{is_dual_stack, parse_cidr_list};
use crate::error::{Error, Result};
use crate::models::{ClusterCidrSet, Network};

/// More than two pod CIDRs is never valid, even for dual-stack.
pub const MAX_CLUSTER_CIDRS: usize = 2;

/// Validate a parsed cluster CIDR list.
///
/// A single network is always accepted. Two networks must be one IPv4 and
/// one IPv6. An empty list is treated as one empty, unparseable entry.
pub fn guard_cluster_cidrs(cidrs: Vec<Network>) -> Result<ClusterCidrSet> {
    if cidrs.is_empty() {
        return Err(Error::InvalidCidr {
            index: 0,
            value: "".to_string(),
            reason: "no cluster CIDR given".to_string(),
        });
    }
    if cidrs.len() > MAX_CLUSTER_CIDRS {
        return Err(Error::TooManyCidrs {
            kind: "cluster",
            count: cidrs.len(),
            max: MAX_CLUSTER_CIDRS,
        });
    }
    if let [first, second] = cidrs.as_slice() {
        if !is_dual_stack(&cidrs) {
            return Err(Error::NotDualStack {
                kind: "cluster",
                first: *first,
                second: *second,
            });
        }
    }
    Ok(ClusterCidrSet::new(cidrs))
}

/// Parse and validate a comma-separated cluster CIDR list.
pub fn validate_cluster_cidrs(cluster_cidr: &str) -> Result<ClusterCidrSet> {
    let cidrs = parse_cidr_list(cluster_cidr)?;
    let cluster_cidrs = guard_cluster_cidrs(cidrs)?;
    log::info!(
        "Cluster CIDRs: {cluster_cidrs} (dual_stack={})",
        cluster_cidrs.is_dual_stack()
    );
    Ok(cluster_cidrs)
}
