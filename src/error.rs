//! Error types for address plan resolution.
//!
//! Every variant is a configuration error: none of them are retryable and
//! all of them abort startup.

use crate::models::Network;
use thiserror::Error;

/// Result type for address plan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Address plan errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // CIDR parsing
    #[error("cluster CIDR[{index}] {value:?} is not a valid CIDR: {reason}")]
    InvalidCidr {
        index: usize,
        value: String,
        reason: String,
    },

    #[error("service-cluster-ip-range[{index}] {value:?} is not a valid CIDR: {reason}")]
    InvalidServiceCidr {
        index: usize,
        value: String,
        reason: String,
    },

    // Cardinality and pairing
    #[error("{kind} CIDR list has {count} entries, more than the max allowed of {max}")]
    TooManyCidrs {
        kind: &'static str,
        count: usize,
        max: usize,
    },

    #[error("{kind} CIDRs {first} and {second} are not dual-stack (one IPv4 and one IPv6 required)")]
    NotDualStack {
        kind: &'static str,
        first: Network,
        second: Network,
    },

    // Node mask sizes
    #[error("conflicting node CIDR mask configuration: {0}")]
    ConflictingMaskConfig(String),

    #[error("invalid node CIDR mask size /{mask}: {reason}")]
    InvalidMaskSize { mask: u32, reason: String },

    // Service range
    #[error("the service cluster IP range {range} must be at least {min} IP addresses, has {size}")]
    ServiceRangeTooSmall { range: Network, size: u64, min: u64 },

    // Configuration sources
    #[error("configuration error: {0}")]
    Config(String),

    // Rendering the resolved plan
    #[error("output error: {0}")]
    Output(String),
}
