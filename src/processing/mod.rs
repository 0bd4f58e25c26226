//! Address plan resolution logic.
//!
//! This module contains the resolution steps, evaluated in dependency order:
//! - [`cidr_list`] - Parsing of comma-separated CIDR lists
//! - [`cluster_guard`] - Cluster CIDR count and dual-stack pairing checks
//! - [`mask_size`] - Node CIDR mask size resolution
//! - [`service_range`] - Service IP ranges and the reserved API server address
//! - [`plan`] - Assembly of the complete [`AddressPlan`](crate::models::AddressPlan)

mod cidr_list;
mod cluster_guard;
mod mask_size;
mod plan;
mod service_range;

// Re-export public functions
pub use cidr_list::{is_dual_stack, parse_cidr_list, process_cidrs, split_cidr_list};
pub use cluster_guard::{guard_cluster_cidrs, validate_cluster_cidrs, MAX_CLUSTER_CIDRS};
pub use mask_size::{resolve_node_mask_sizes, DEFAULT_NODE_MASK_IPV4, DEFAULT_NODE_MASK_IPV6};
pub use plan::{resolve_address_plan, resolve_node_ipam};
pub use service_range::{
    derive_service_ranges, DefaultServiceIpAllocator, ServiceIpAllocator,
    DEFAULT_SERVICE_IP_CIDR, MAX_SERVICE_CIDRS, MAX_SERVICE_RANGE_SIZE, MIN_SERVICE_RANGE_SIZE,
};
