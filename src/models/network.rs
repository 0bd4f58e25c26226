//! IP network and CIDR notation utilities.
//!
//! Provides [`Network`], an IPv4 or IPv6 network tagged with its [`IpFamily`],
//! along with the range calculations used when sizing node and service ranges.

use ipnet::IpNet;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of a [`Network`].
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash, Serialize, Deserialize)]
pub enum IpFamily {
    IPv4,
    IPv6,
}

impl IpFamily {
    /// Longest valid prefix for this family.
    pub fn max_prefix_len(self) -> u8 {
        match self {
            IpFamily::IPv4 => MAX_LENGTH_V4,
            IpFamily::IPv6 => MAX_LENGTH_V6,
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IpFamily::IPv4 => write!(f, "IPv4"),
            IpFamily::IPv6 => write!(f, "IPv6"),
        }
    }
}

/// IP network in CIDR notation. Host bits are always zero.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    net: IpNet,
}

impl Network {
    /// Parse a [`Network`] from a CIDR string (e.g., "10.0.0.0/16" or "fd00::/48").
    ///
    /// Surrounding whitespace is ignored and host bits are masked off, so
    /// "10.0.0.5/16" yields 10.0.0.0/16.
    ///
    /// # Examples
    /// ```
    /// use cluster_address_plan::models::{IpFamily, Network};
    /// let net = Network::new(" 10.0.0.5/16 ").unwrap();
    /// assert_eq!(net.to_string(), "10.0.0.0/16");
    /// assert_eq!(net.family(), IpFamily::IPv4);
    /// ```
    pub fn new(addr_cidr: &str) -> Result<Network, ipnet::AddrParseError> {
        let net: IpNet = addr_cidr.trim().parse()?;
        Ok(Network::from(net))
    }

    pub fn family(&self) -> IpFamily {
        match self.net {
            IpNet::V4(_) => IpFamily::IPv4,
            IpNet::V6(_) => IpFamily::IPv6,
        }
    }

    pub fn is_ipv6(&self) -> bool {
        self.family() == IpFamily::IPv6
    }

    /// The network (lowest) address.
    pub fn addr(&self) -> IpAddr {
        self.net.network()
    }

    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    pub fn max_prefix_len(&self) -> u8 {
        self.family().max_prefix_len()
    }

    /// Number of host bits below the prefix.
    pub fn host_bits(&self) -> u8 {
        self.max_prefix_len() - self.prefix_len()
    }

    /// The highest address in the network.
    pub fn hi(&self) -> IpAddr {
        self.net.broadcast()
    }

    /// Check if an IP address is contained within this network.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.net.contains(&ip)
    }

    /// Number of addresses in the network, as used when sizing IP ranges.
    ///
    /// Returns 0 for IPv4 networks with 31 or more host bits and IPv6 networks
    /// with 127 or more host bits, and saturates at `i64::MAX` for very large
    /// IPv6 networks.
    pub fn range_size(&self) -> u64 {
        let host_bits = self.host_bits();
        match self.family() {
            IpFamily::IPv4 if host_bits >= 31 => return 0,
            IpFamily::IPv6 if host_bits >= 127 => return 0,
            _ => {}
        }
        if host_bits >= 63 {
            i64::MAX as u64
        } else {
            1u64 << host_bits
        }
    }

    /// Returns the address `index` positions after the network address, or
    /// `None` if that address falls outside the network.
    pub fn indexed_addr(&self, index: u128) -> Option<IpAddr> {
        let base = addr_bits(self.addr());
        let hi = addr_bits(self.hi());
        let bits = base.checked_add(index).filter(|b| *b <= hi)?;
        Some(match self.family() {
            IpFamily::IPv4 => IpAddr::from((bits as u32).to_be_bytes()),
            IpFamily::IPv6 => IpAddr::from(bits.to_be_bytes()),
        })
    }

    /// Number of `/mask` subnets that fit in this network.
    ///
    /// Returns `None` if `mask` is shorter than this network's prefix or longer
    /// than the family allows. Saturates at `u128::MAX`.
    pub fn node_subnet_count(&self, mask: u8) -> Option<u128> {
        if mask < self.prefix_len() || mask > self.max_prefix_len() {
            return None;
        }
        let diff = u32::from(mask - self.prefix_len());
        Some(1u128.checked_shl(diff).unwrap_or(u128::MAX))
    }
}

fn addr_bits(addr: IpAddr) -> u128 {
    match addr {
        IpAddr::V4(a) => u128::from(u32::from(a)),
        IpAddr::V6(a) => u128::from(a),
    }
}

impl From<IpNet> for Network {
    fn from(net: IpNet) -> Self {
        Network { net: net.trunc() }
    }
}

impl FromStr for Network {
    type Err = ipnet::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::new(s)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.net)
    }
}
