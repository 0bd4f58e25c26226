//! Service IP range data model.

use super::Network;
use serde::Serialize;
use std::fmt;
use std::net::IpAddr;

/// Service cluster IP ranges plus the address reserved for the API server's
/// in-cluster service.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRangeSet {
    /// Primary service range, always present.
    pub primary: Network,
    /// Secondary service range of the other address family (dual-stack only).
    pub secondary: Option<Network>,
    /// Address inside `primary` reserved for the API server.
    pub api_server_service_ip: IpAddr,
}

impl ServiceRangeSet {
    pub fn is_dual_stack(&self) -> bool {
        self.secondary.is_some()
    }
}

impl fmt::Display for ServiceRangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{},{}", self.primary, secondary)?,
            None => write!(f, "{}", self.primary)?,
        }
        write!(f, " (apiserver {})", self.api_server_service_ip)
    }
}
