//! Loading configuration from a JSON file and environment variables.

use super::RawAddressConfig;
use crate::error::{Error, Result};
use std::path::Path;
use std::str::FromStr;

pub const ENV_CLUSTER_CIDR: &str = "CLUSTER_CIDR";
pub const ENV_SERVICE_CIDR: &str = "SERVICE_CIDR";
pub const ENV_NODE_CIDR_MASK_SIZE: &str = "NODE_CIDR_MASK_SIZE";
pub const ENV_NODE_CIDR_MASK_SIZE_IPV4: &str = "NODE_CIDR_MASK_SIZE_IPV4";
pub const ENV_NODE_CIDR_MASK_SIZE_IPV6: &str = "NODE_CIDR_MASK_SIZE_IPV6";
pub const ENV_ALLOCATE_NODE_CIDRS: &str = "ALLOCATE_NODE_CIDRS";

/// Read a [`RawAddressConfig`] from a JSON file.
///
/// Missing keys take their defaults. Decoding errors name the failing key.
pub fn read_config_file(config_file: &str) -> Result<RawAddressConfig> {
    if !Path::new(config_file).exists() {
        return Err(Error::Config(format!(
            "Config file does not exist: {config_file}"
        )));
    }
    log::info!("Reading config file: {config_file}");

    let json = std::fs::read_to_string(config_file)
        .map_err(|e| Error::Config(format!("Error reading config file {config_file}: {e}")))?;
    let de = &mut serde_json::Deserializer::from_str(&json);
    serde_path_to_error::deserialize(de).map_err(|e| {
        Error::Config(format!(
            "Error parsing config file {config_file} at {}: {}",
            e.path(),
            e.inner()
        ))
    })
}

/// Override config values with any set environment variables.
pub fn apply_env_overrides(config: RawAddressConfig) -> Result<RawAddressConfig> {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Override config values using `lookup` to fetch variables by name.
pub fn apply_overrides<F>(mut config: RawAddressConfig, lookup: F) -> Result<RawAddressConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup(ENV_CLUSTER_CIDR) {
        log::debug!("{ENV_CLUSTER_CIDR}={v}");
        config.cluster_cidr = v;
    }
    if let Some(v) = lookup(ENV_SERVICE_CIDR) {
        log::debug!("{ENV_SERVICE_CIDR}={v}");
        config.service_cidr = v;
    }
    if let Some(v) = lookup(ENV_NODE_CIDR_MASK_SIZE) {
        config.node_cidr_mask_size = parse_env(ENV_NODE_CIDR_MASK_SIZE, &v)?;
    }
    if let Some(v) = lookup(ENV_NODE_CIDR_MASK_SIZE_IPV4) {
        config.node_cidr_mask_size_ipv4 = parse_env(ENV_NODE_CIDR_MASK_SIZE_IPV4, &v)?;
    }
    if let Some(v) = lookup(ENV_NODE_CIDR_MASK_SIZE_IPV6) {
        config.node_cidr_mask_size_ipv6 = parse_env(ENV_NODE_CIDR_MASK_SIZE_IPV6, &v)?;
    }
    if let Some(v) = lookup(ENV_ALLOCATE_NODE_CIDRS) {
        config.allocate_node_cidrs = parse_env(ENV_ALLOCATE_NODE_CIDRS, &v)?;
    }
    Ok(config)
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    log::debug!("{key}={value}");
    value
        .trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value {value:?} for {key}: {e}")))
}

/// Load configuration from an optional file, then apply environment overrides.
pub fn load_config(config_file: Option<&str>) -> Result<RawAddressConfig> {
    let config = match config_file {
        Some(file) => read_config_file(file)?,
        None => {
            log::info!("No config file given, using environment only");
            RawAddressConfig::default()
        }
    };
    apply_env_overrides(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_read_config_file() {
        let config = read_config_file("src/tests/test_data/dual_stack.json")
            .expect("Error reading config file");
        assert_eq!(config.cluster_cidr, "10.0.0.0/16,fd00::/48");
        assert_eq!(config.service_cidr, "10.96.0.0/12,fd00:1::/108");
        assert_eq!(config.node_cidr_mask_size_ipv4, 23);
        assert_eq!(config.node_cidr_mask_size_ipv6, 80);
        assert_eq!(config.node_cidr_mask_size, 0);
        assert!(config.allocate_node_cidrs);
    }

    #[test]
    fn test_read_config_file_missing() {
        let err = read_config_file("src/tests/test_data/nope.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_read_config_file_bad_type() {
        let err = read_config_file("src/tests/test_data/bad_mask_type.json").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nodeCIDRMaskSizeIPv4"), "got: {msg}");
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_CLUSTER_CIDR, "fd00::/48"),
            (ENV_NODE_CIDR_MASK_SIZE_IPV6, " 96 "),
            (ENV_ALLOCATE_NODE_CIDRS, "false"),
        ]);
        let config = apply_overrides(RawAddressConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.cluster_cidr, "fd00::/48");
        assert_eq!(config.node_cidr_mask_size_ipv6, 96);
        assert!(!config.allocate_node_cidrs);
        assert_eq!(config.service_cidr, "");
    }

    #[test]
    fn test_apply_overrides_invalid() {
        let err = apply_overrides(RawAddressConfig::default(), |k| {
            (k == ENV_NODE_CIDR_MASK_SIZE).then(|| "twenty".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(ENV_NODE_CIDR_MASK_SIZE));
    }
}
