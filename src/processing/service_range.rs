//! Service IP range derivation.
//!
//! Parses the service cluster IP range list, checks dual-stack pairing and
//! reserves the API server's in-cluster service IP inside the primary range.

use super::cidr_list::split_cidr_list;
use crate::error::{Error, Result};
use crate::models::{Network, ServiceRangeSet};
use std::net::IpAddr;

/// Service range used when none is configured.
pub const DEFAULT_SERVICE_IP_CIDR: &str = "10.0.0.0/24";
/// Smallest usable service range, in addresses.
pub const MIN_SERVICE_RANGE_SIZE: u64 = 8;
/// Ranges are sized as if they had at most this many addresses.
pub const MAX_SERVICE_RANGE_SIZE: u64 = 1 << 16;
/// At most a primary and a secondary range.
pub const MAX_SERVICE_CIDRS: usize = 2;

/// Resolves the primary service range and the address reserved in it.
pub trait ServiceIpAllocator {
    /// Given the configured primary range, or `None` to use the default,
    /// return the resolved range and the reserved API server address.
    fn service_ip_range(&self, candidate: Option<Network>) -> Result<(Network, IpAddr)>;
}

/// Reserves the first address after the network address.
#[derive(Debug, Clone, Copy)]
pub struct DefaultServiceIpAllocator {
    default_range: Network,
}

impl DefaultServiceIpAllocator {
    pub fn new(default_range: Network) -> Self {
        DefaultServiceIpAllocator { default_range }
    }
}

impl Default for DefaultServiceIpAllocator {
    fn default() -> Self {
        let default_range =
            Network::new(DEFAULT_SERVICE_IP_CIDR).expect("Invalid default service CIDR");
        DefaultServiceIpAllocator { default_range }
    }
}

impl ServiceIpAllocator for DefaultServiceIpAllocator {
    fn service_ip_range(&self, candidate: Option<Network>) -> Result<(Network, IpAddr)> {
        let range = match candidate {
            Some(range) => range,
            None => {
                log::warn!(
                    "No CIDR for service cluster IPs specified, using default {}",
                    self.default_range
                );
                self.default_range
            }
        };

        let size = range.range_size().min(MAX_SERVICE_RANGE_SIZE);
        if size < MIN_SERVICE_RANGE_SIZE {
            return Err(Error::ServiceRangeTooSmall {
                range,
                size,
                min: MIN_SERVICE_RANGE_SIZE,
            });
        }

        let api_server_service_ip = range.indexed_addr(1).ok_or(Error::ServiceRangeTooSmall {
            range,
            size,
            min: MIN_SERVICE_RANGE_SIZE,
        })?;
        Ok((range, api_server_service_ip))
    }
}

fn parse_service_cidr(index: usize, segment: &str) -> Result<Network> {
    Network::new(segment).map_err(|e| Error::InvalidServiceCidr {
        index,
        value: segment.to_string(),
        reason: e.to_string(),
    })
}

/// Derive the service IP ranges from a comma-separated list.
///
/// # Arguments
/// * `service_cidr` - Zero, one or two CIDRs; empty means use the default range
/// * `allocator` - Resolves the primary range and its reserved address
///
/// # Returns
/// * `Ok(ServiceRangeSet)` - Primary, optional secondary and reserved address
/// * `Err` - `InvalidServiceCidr`, `TooManyCidrs`, `NotDualStack` or an allocator error
pub fn derive_service_ranges(
    service_cidr: &str,
    allocator: &dyn ServiceIpAllocator,
) -> Result<ServiceRangeSet> {
    if service_cidr.trim().is_empty() {
        let (primary, api_server_service_ip) = allocator.service_ip_range(None)?;
        log::info!("Service range: {primary} (default), apiserver service IP {api_server_service_ip}");
        return Ok(ServiceRangeSet {
            primary,
            secondary: None,
            api_server_service_ip,
        });
    }

    let segments = split_cidr_list(service_cidr);
    if segments.len() > MAX_SERVICE_CIDRS {
        return Err(Error::TooManyCidrs {
            kind: "service",
            count: segments.len(),
            max: MAX_SERVICE_CIDRS,
        });
    }

    let primary = parse_service_cidr(0, segments[0])?;
    let (primary, api_server_service_ip) = allocator.service_ip_range(Some(primary))?;

    let secondary = match segments.get(1) {
        Some(segment) => {
            let secondary = parse_service_cidr(1, segment)?;
            if secondary.family() == primary.family() {
                return Err(Error::NotDualStack {
                    kind: "service",
                    first: primary,
                    second: secondary,
                });
            }
            Some(secondary)
        }
        None => None,
    };

    let ranges = ServiceRangeSet {
        primary,
        secondary,
        api_server_service_ip,
    };
    log::info!("Service ranges: {ranges}");
    Ok(ranges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_range() {
        let ranges = derive_service_ranges("", &DefaultServiceIpAllocator::default()).unwrap();
        assert_eq!(ranges.primary.to_string(), "10.0.0.0/24");
        assert_eq!(ranges.secondary, None);
        assert_eq!(
            ranges.api_server_service_ip,
            IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1))
        );
        assert!(ranges.primary.contains(ranges.api_server_service_ip));

        let blank = derive_service_ranges("  ", &DefaultServiceIpAllocator::default()).unwrap();
        assert_eq!(blank, ranges);
    }

    #[test]
    fn test_custom_default_range() {
        let allocator = DefaultServiceIpAllocator::new(Network::new("fd00:2::/112").unwrap());
        let ranges = derive_service_ranges("", &allocator).unwrap();
        assert_eq!(ranges.primary.to_string(), "fd00:2::/112");
        assert_eq!(ranges.api_server_service_ip.to_string(), "fd00:2::1");
    }

    #[test]
    fn test_single_range() {
        let ranges =
            derive_service_ranges("10.96.0.0/12", &DefaultServiceIpAllocator::default()).unwrap();
        assert_eq!(ranges.primary.to_string(), "10.96.0.0/12");
        assert_eq!(
            ranges.api_server_service_ip,
            IpAddr::V4(Ipv4Addr::new(10, 96, 0, 1))
        );
        assert!(!ranges.is_dual_stack());
    }

    #[test]
    fn test_dual_stack_ranges() {
        let ranges = derive_service_ranges(
            "10.96.0.0/12,fd00:1::/108",
            &DefaultServiceIpAllocator::default(),
        )
        .unwrap();
        assert_eq!(ranges.primary.to_string(), "10.96.0.0/12");
        assert_eq!(ranges.secondary.unwrap().to_string(), "fd00:1::/108");
        assert!(ranges.primary.contains(ranges.api_server_service_ip));
        assert!(ranges.is_dual_stack());

        let ranges = derive_service_ranges(
            "fd00:1::/108, 10.96.0.0/12",
            &DefaultServiceIpAllocator::default(),
        )
        .unwrap();
        assert_eq!(ranges.api_server_service_ip.to_string(), "fd00:1::1");
    }

    #[test]
    fn test_same_family_ranges() {
        let err = derive_service_ranges(
            "10.96.0.0/12,10.112.0.0/12",
            &DefaultServiceIpAllocator::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NotDualStack { kind: "service", .. }));
    }

    #[test]
    fn test_invalid_ranges() {
        let allocator = DefaultServiceIpAllocator::default();
        let err = derive_service_ranges("10.96.0.0", &allocator).unwrap_err();
        assert!(matches!(err, Error::InvalidServiceCidr { index: 0, .. }));

        let err = derive_service_ranges("10.96.0.0/12,fd00:1::/200", &allocator).unwrap_err();
        assert!(matches!(err, Error::InvalidServiceCidr { index: 1, .. }));

        let err =
            derive_service_ranges("10.96.0.0/12,fd00:1::/108,fd00:2::/108", &allocator).unwrap_err();
        assert!(matches!(err, Error::TooManyCidrs { kind: "service", count: 3, .. }));
    }

    #[test]
    fn test_range_too_small() {
        let allocator = DefaultServiceIpAllocator::default();
        let err = derive_service_ranges("10.96.0.0/30", &allocator).unwrap_err();
        assert!(matches!(err, Error::ServiceRangeTooSmall { size: 4, min: 8, .. }));

        assert!(derive_service_ranges("10.96.0.0/29", &allocator).is_ok());
        assert!(derive_service_ranges("0.0.0.0/1", &allocator).is_err());
    }

    struct FixedAllocator;

    impl ServiceIpAllocator for FixedAllocator {
        fn service_ip_range(&self, candidate: Option<Network>) -> Result<(Network, IpAddr)> {
            let range = candidate.unwrap_or(Network::new("172.30.0.0/16").unwrap());
            Ok((range, range.indexed_addr(10).unwrap()))
        }
    }

    #[test]
    fn test_custom_allocator() {
        let ranges = derive_service_ranges("", &FixedAllocator).unwrap();
        assert_eq!(ranges.api_server_service_ip.to_string(), "172.30.0.10");
        let ranges = derive_service_ranges("10.96.0.0/12", &FixedAllocator).unwrap();
        assert_eq!(ranges.api_server_service_ip.to_string(), "10.96.0.10");
    }
}
