//! Comma-separated CIDR list parsing.

use crate::error::{Error, Result};
use crate::models::Network;

/// Split a comma-separated CIDR list into trimmed segments.
///
/// An empty string yields a single empty segment, which then fails to parse.
pub fn split_cidr_list(cidrs_list: &str) -> Vec<&str> {
    cidrs_list.trim().split(',').map(str::trim).collect()
}

/// Parse every segment of a comma-separated cluster CIDR list.
///
/// # Returns
/// * `Ok(Vec<Network>)` - The networks in input order
/// * `Err(Error::InvalidCidr)` - For the first segment that does not parse
pub fn parse_cidr_list(cidrs_list: &str) -> Result<Vec<Network>> {
    split_cidr_list(cidrs_list)
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            Network::new(segment).map_err(|e| Error::InvalidCidr {
                index,
                value: segment.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// True when there are exactly two networks, one of each address family.
pub fn is_dual_stack(cidrs: &[Network]) -> bool {
    match cidrs {
        [first, second] => first.family() != second.family(),
        _ => false,
    }
}

/// Parse a cluster CIDR list and classify it as dual-stack or not.
pub fn process_cidrs(cidrs_list: &str) -> Result<(Vec<Network>, bool)> {
    let cidrs = parse_cidr_list(cidrs_list)?;
    let dual_stack = is_dual_stack(&cidrs);
    log::debug!(
        "Parsed {} cluster CIDR(s) from {cidrs_list:?}, dual_stack={dual_stack}",
        cidrs.len()
    );
    Ok((cidrs, dual_stack))
}
