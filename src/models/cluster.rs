//! Pod network (cluster CIDR) data model.

use super::{IpFamily, Network};
use crate::error::{Error, Result};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Ordered list of 1 or 2 cluster CIDRs, validated by
/// [`validate_cluster_cidrs`](crate::processing::validate_cluster_cidrs).
///
/// With two entries they are always one IPv4 and one IPv6 network.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct ClusterCidrSet(Vec<Network>);

impl ClusterCidrSet {
    pub(crate) fn new(cidrs: Vec<Network>) -> Self {
        ClusterCidrSet(cidrs)
    }

    pub fn networks(&self) -> &[Network] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Network> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_dual_stack(&self) -> bool {
        self.0.len() == 2
    }

    /// The family of a single-stack cluster, `None` for dual-stack.
    pub fn single_stack_family(&self) -> Option<IpFamily> {
        match self.0.as_slice() {
            [only] => Some(only.family()),
            _ => None,
        }
    }
}

impl fmt::Display for ClusterCidrSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

/// Node CIDR mask size overrides. `None` means the value was not configured.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NodeMaskConfig {
    /// Legacy single mask size, applies to single-stack clusters only.
    pub legacy_mask: Option<u8>,
    pub mask_v4: Option<u8>,
    pub mask_v6: Option<u8>,
}

impl NodeMaskConfig {
    /// Build from raw configuration integers, where 0 means unset.
    pub fn from_raw(legacy_mask: u32, mask_v4: u32, mask_v6: u32) -> Result<Self> {
        Ok(NodeMaskConfig {
            legacy_mask: raw_mask(legacy_mask)?,
            mask_v4: raw_mask(mask_v4)?,
            mask_v6: raw_mask(mask_v6)?,
        })
    }
}

fn raw_mask(mask: u32) -> Result<Option<u8>> {
    match mask {
        0 => Ok(None),
        m => u8::try_from(m)
            .map(Some)
            .map_err(|_| Error::InvalidMaskSize {
                mask: m,
                reason: "not a valid prefix length".to_string(),
            }),
    }
}

/// Node mask size per cluster CIDR, in cluster CIDR order.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct NodeMaskSizes(Vec<u8>);

impl NodeMaskSizes {
    pub(crate) fn new(sizes: Vec<u8>) -> Self {
        NodeMaskSizes(sizes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the node CIDR allocator needs: cluster CIDRs and their
/// node mask sizes, zipped by position.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NodeIpamPlan {
    pub cluster_cidrs: ClusterCidrSet,
    pub node_mask_sizes: NodeMaskSizes,
}

impl NodeIpamPlan {
    pub(crate) fn new(cluster_cidrs: ClusterCidrSet, node_mask_sizes: NodeMaskSizes) -> Self {
        debug_assert_eq!(cluster_cidrs.len(), node_mask_sizes.len());
        NodeIpamPlan {
            cluster_cidrs,
            node_mask_sizes,
        }
    }

    /// Each cluster CIDR paired with its node mask size.
    pub fn pairs(&self) -> impl Iterator<Item = (Network, u8)> + '_ {
        self.cluster_cidrs
            .iter()
            .copied()
            .zip(self.node_mask_sizes.as_slice().iter().copied())
    }
}
