// cargo watch -x 'fmt' -x 'test'

//! Cluster address plan resolution.
//!
//! Validates the pod (cluster) and service CIDR configuration of a cluster,
//! decides single-stack vs dual-stack, computes the node CIDR mask sizes for
//! the node CIDR allocator and reserves the API server's service IP.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::{load_config, RawAddressConfig};
pub use error::{Error, Result};
pub use models::AddressPlan;
pub use processing::{resolve_address_plan, DefaultServiceIpAllocator, ServiceIpAllocator};

/// Load configuration and resolve the plan with the default service IP allocator.
pub fn get_address_plan(config_file: Option<&str>) -> Result<AddressPlan> {
    let config = load_config(config_file)?;
    resolve_address_plan(&config, &DefaultServiceIpAllocator::default())
}
