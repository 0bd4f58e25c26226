//! Node CIDR mask size resolution.
//!
//! The legacy single mask size and the per-family mask sizes are mutually
//! exclusive, and a per-family mask size may not be given for a single-stack
//! cluster of the other family.

use crate::error::{Error, Result};
use crate::models::{ClusterCidrSet, IpFamily, NodeMaskConfig, NodeMaskSizes};

/// Default node mask size for IPv4 cluster CIDRs.
pub const DEFAULT_NODE_MASK_IPV4: u8 = 24;
/// Default node mask size for IPv6 cluster CIDRs.
pub const DEFAULT_NODE_MASK_IPV6: u8 = 64;

/// Resolve one node mask size per cluster CIDR, in cluster CIDR order.
///
/// # Arguments
/// * `cluster_cidrs` - The validated cluster CIDRs
/// * `cfg` - Configured mask size overrides
///
/// # Returns
/// * `Ok(NodeMaskSizes)` - Same length and order as `cluster_cidrs`
/// * `Err(Error::ConflictingMaskConfig)` - If the overrides can't be combined
/// * `Err(Error::InvalidMaskSize)` - If a size doesn't fit its cluster CIDR
pub fn resolve_node_mask_sizes(
    cluster_cidrs: &ClusterCidrSet,
    cfg: &NodeMaskConfig,
) -> Result<NodeMaskSizes> {
    let (mask_v4, mask_v6) = select_family_masks(cluster_cidrs, cfg)?;

    let sizes: Vec<u8> = cluster_cidrs
        .iter()
        .map(|cidr| match cidr.family() {
            IpFamily::IPv4 => mask_v4,
            IpFamily::IPv6 => mask_v6,
        })
        .collect();

    for (cidr, &mask) in cluster_cidrs.iter().zip(sizes.iter()) {
        if mask > cidr.max_prefix_len() {
            return Err(Error::InvalidMaskSize {
                mask: mask.into(),
                reason: format!(
                    "longer than the {} maximum of /{} for cluster CIDR {cidr}",
                    cidr.family(),
                    cidr.max_prefix_len()
                ),
            });
        }
        if mask < cidr.prefix_len() {
            return Err(Error::InvalidMaskSize {
                mask: mask.into(),
                reason: format!("shorter than the prefix of cluster CIDR {cidr}"),
            });
        }
        log::debug!("Node mask size for {cidr} is /{mask}");
    }

    Ok(NodeMaskSizes::new(sizes))
}

/// Pick the (IPv4, IPv6) mask sizes to apply, checking the override rules.
fn select_family_masks(cluster_cidrs: &ClusterCidrSet, cfg: &NodeMaskConfig) -> Result<(u8, u8)> {
    let mut mask_v4 = DEFAULT_NODE_MASK_IPV4;
    let mut mask_v6 = DEFAULT_NODE_MASK_IPV6;

    let family = match cluster_cidrs.single_stack_family() {
        Some(family) => family,
        None => {
            if let Some(legacy) = cfg.legacy_mask {
                return Err(Error::ConflictingMaskConfig(format!(
                    "legacy node CIDR mask size /{legacy} is not allowed with dual-stack clusters, \
                     use the IPv4 and IPv6 mask sizes instead"
                )));
            }
            return Ok((
                cfg.mask_v4.unwrap_or(mask_v4),
                cfg.mask_v6.unwrap_or(mask_v6),
            ));
        }
    };

    if let Some(legacy) = cfg.legacy_mask {
        if cfg.mask_v4.is_some() || cfg.mask_v6.is_some() {
            return Err(Error::ConflictingMaskConfig(
                "the IPv4 and IPv6 node CIDR mask sizes are not allowed if the legacy \
                 node CIDR mask size is set"
                    .to_string(),
            ));
        }
        return Ok((legacy, legacy));
    }

    if let Some(v4) = cfg.mask_v4 {
        if family == IpFamily::IPv6 {
            return Err(Error::ConflictingMaskConfig(
                "the IPv4 node CIDR mask size is not allowed for a single-stack IPv6 cluster"
                    .to_string(),
            ));
        }
        mask_v4 = v4;
    }

    if let Some(v6) = cfg.mask_v6 {
        if family == IpFamily::IPv4 {
            return Err(Error::ConflictingMaskConfig(
                "the IPv6 node CIDR mask size is not allowed for a single-stack IPv4 cluster"
                    .to_string(),
            ));
        }
        mask_v6 = v6;
    }

    Ok((mask_v4, mask_v6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::validate_cluster_cidrs;

    fn masks(legacy: u8, v4: u8, v6: u8) -> NodeMaskConfig {
        NodeMaskConfig::from_raw(legacy.into(), v4.into(), v6.into()).unwrap()
    }

    fn resolve(cluster_cidr: &str, cfg: NodeMaskConfig) -> Result<Vec<u8>> {
        let cidrs = validate_cluster_cidrs(cluster_cidr).unwrap();
        resolve_node_mask_sizes(&cidrs, &cfg).map(|s| s.as_slice().to_vec())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(resolve("10.0.0.0/16", masks(0, 0, 0)).unwrap(), vec![24]);
        assert_eq!(resolve("fd00::/48", masks(0, 0, 0)).unwrap(), vec![64]);
        assert_eq!(
            resolve("10.0.0.0/16,fd00::/48", masks(0, 0, 0)).unwrap(),
            vec![24, 64]
        );
    }

    #[test]
    fn test_dual_stack_overrides_keep_order() {
        assert_eq!(
            resolve("10.0.0.0/16,fd00::/48", masks(0, 23, 80)).unwrap(),
            vec![23, 80]
        );
        assert_eq!(
            resolve("fd00::/48,10.0.0.0/16", masks(0, 23, 80)).unwrap(),
            vec![80, 23]
        );
        assert_eq!(
            resolve("fd00::/48,10.0.0.0/16", masks(0, 0, 56)).unwrap(),
            vec![56, 24]
        );
    }

    #[test]
    fn test_dual_stack_rejects_legacy() {
        for legacy in [8, 24, 26, 64] {
            let err = resolve("10.0.0.0/8,fd00::/48", masks(legacy, 0, 0)).unwrap_err();
            assert!(matches!(err, Error::ConflictingMaskConfig(_)), "legacy={legacy}");
        }
        let err = resolve("10.0.0.0/8,fd00::/48", masks(24, 24, 64)).unwrap_err();
        assert!(matches!(err, Error::ConflictingMaskConfig(_)));
    }

    #[test]
    fn test_single_stack_legacy() {
        assert_eq!(resolve("10.0.0.0/16", masks(26, 0, 0)).unwrap(), vec![26]);
        assert_eq!(resolve("fd00::/48", masks(96, 0, 0)).unwrap(), vec![96]);

        let err = resolve("10.0.0.0/16", masks(26, 25, 0)).unwrap_err();
        assert!(matches!(err, Error::ConflictingMaskConfig(_)));
        let err = resolve("10.0.0.0/16", masks(26, 0, 64)).unwrap_err();
        assert!(matches!(err, Error::ConflictingMaskConfig(_)));
    }

    #[test]
    fn test_single_stack_family_mismatch() {
        let err = resolve("fd00::/48", masks(0, 24, 0)).unwrap_err();
        assert!(matches!(err, Error::ConflictingMaskConfig(_)));
        let err = resolve("10.0.0.0/16", masks(0, 0, 64)).unwrap_err();
        assert!(matches!(err, Error::ConflictingMaskConfig(_)));
    }

    #[test]
    fn test_single_stack_family_override() {
        assert_eq!(resolve("10.0.0.0/16", masks(0, 20, 0)).unwrap(), vec![20]);
        assert_eq!(resolve("fd00::/48", masks(0, 0, 112)).unwrap(), vec![112]);
    }

    #[test]
    fn test_mask_must_fit_cluster_cidr() {
        let err = resolve("10.0.0.0/20", masks(16, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidMaskSize { mask: 16, .. }));

        let err = resolve("10.0.0.0/16", masks(0, 33, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidMaskSize { mask: 33, .. }));

        // legacy mask applies regardless of family, so /64 can't fit an IPv4 cluster
        let err = resolve("10.0.0.0/16", masks(64, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidMaskSize { mask: 64, .. }));

        assert_eq!(resolve("10.0.0.0/24", masks(0, 0, 0)).unwrap(), vec![24]);
    }
}
