//! Address plan assembly.

use super::{
    derive_service_ranges, resolve_node_mask_sizes, validate_cluster_cidrs, ServiceIpAllocator,
};
use crate::config::RawAddressConfig;
use crate::error::Result;
use crate::models::{AddressPlan, NodeIpamPlan, NodeMaskConfig};
use colored::Colorize;

/// Resolve the node IPAM inputs from the raw configuration.
pub fn resolve_node_ipam(config: &RawAddressConfig) -> Result<NodeIpamPlan> {
    let cluster_cidrs = validate_cluster_cidrs(&config.cluster_cidr)?;
    let mask_config = NodeMaskConfig::from_raw(
        config.node_cidr_mask_size,
        config.node_cidr_mask_size_ipv4,
        config.node_cidr_mask_size_ipv6,
    )?;
    let node_mask_sizes = resolve_node_mask_sizes(&cluster_cidrs, &mask_config)?;
    Ok(NodeIpamPlan::new(cluster_cidrs, node_mask_sizes))
}

/// Resolve the complete address plan. The first error aborts resolution.
///
/// # Arguments
/// * `config` - Raw configuration values
/// * `allocator` - Resolves the primary service range and reserved address
pub fn resolve_address_plan(
    config: &RawAddressConfig,
    allocator: &dyn ServiceIpAllocator,
) -> Result<AddressPlan> {
    log::info!("#Start resolve_address_plan()");

    let node_ipam = if config.allocate_node_cidrs {
        Some(resolve_node_ipam(config)?)
    } else {
        log::info!(
            "Node CIDR allocation is {}, skipping cluster CIDR {:?}",
            "disabled".yellow(),
            config.cluster_cidr
        );
        None
    };

    let service_ranges = derive_service_ranges(&config.service_cidr, allocator)?;

    Ok(AddressPlan {
        node_ipam,
        service_ranges,
    })
}
