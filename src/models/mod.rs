//! Domain models for cluster address planning.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`Network`] - IPv4/IPv6 network with CIDR notation support
//! - [`ClusterCidrSet`], [`NodeMaskConfig`], [`NodeMaskSizes`] - pod network layout
//! - [`ServiceRangeSet`] - service IP ranges and the reserved API server address
//! - [`AddressPlan`] - the complete resolved plan

mod cluster;
mod network;
mod plan;
mod service;

// Re-export public types
pub use cluster::{ClusterCidrSet, NodeIpamPlan, NodeMaskConfig, NodeMaskSizes};
pub use network::{IpFamily, Network, MAX_LENGTH_V4, MAX_LENGTH_V6};
pub use plan::AddressPlan;
pub use service::ServiceRangeSet;
