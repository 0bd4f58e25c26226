//! Configuration sources.
//!
//! - [`raw`] - The raw, unvalidated configuration record
//! - [`source`] - JSON config files and environment variable overrides

mod raw;
mod source;

pub use raw::RawAddressConfig;
pub use source::{
    apply_env_overrides, apply_overrides, load_config, read_config_file, ENV_ALLOCATE_NODE_CIDRS,
    ENV_CLUSTER_CIDR, ENV_NODE_CIDR_MASK_SIZE, ENV_NODE_CIDR_MASK_SIZE_IPV4,
    ENV_NODE_CIDR_MASK_SIZE_IPV6, ENV_SERVICE_CIDR,
};
