// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as env_vars, metadata};
use std::env;
use std::net::Ipv6Addr;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where credential material and the bootstrap-kubeconfig are written, and
/// where the metadata blob is read from
#[derive(Debug, Clone)]
pub struct Config {
    pub bootstrap_kubeconfig: PathBuf,
    pub ca_cert_path: PathBuf,
    /// Only used by providers that hand out a kubelet certificate directly
    pub kubelet_cert_path: PathBuf,
    pub kubelet_key_path: PathBuf,
    /// Read the blob from this file instead of the metadata service
    pub metadata_file: Option<PathBuf>,
    pub metadata_url: Option<Url>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bootstrap_kubeconfig: PathBuf::from("bootstrap-kubeconfig"),
            ca_cert_path: PathBuf::from("ca-certificates.crt"),
            kubelet_cert_path: PathBuf::from("kubelet.crt"),
            kubelet_key_path: PathBuf::from("kubelet.key"),
            metadata_file: None,
            metadata_url: None,
            timeout: Duration::from_secs(metadata::DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// API server address advertised to pods through the in-cluster service
/// environment. Resolved once at startup and handed to kubeconfig assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiServerOverride {
    address: Option<String>,
}

impl ApiServerOverride {
    /// Read `KUBERNETES_SERVICE_HOST` and `KUBERNETES_SERVICE_PORT_HTTPS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve the override from an arbitrary variable lookup.
    /// Both variables must be present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        match (
            non_empty(env_vars::SERVICE_HOST),
            non_empty(env_vars::SERVICE_PORT_HTTPS),
        ) {
            (Some(host), Some(port)) => Self::new(host.trim(), port.trim()),
            _ => Self::default(),
        }
    }

    /// IPv6 hosts are bracketed so the address stays a valid URL authority
    pub fn new(host: &str, port: &str) -> Self {
        let address = if host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]:{}", host, port)
        } else {
            format!("{}:{}", host, port)
        };
        ApiServerOverride {
            address: Some(address),
        }
    }

    /// `host:port` when the override is active
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_override_requires_both_variables() {
        let only_host = ApiServerOverride::from_lookup(lookup_from(&[(
            "KUBERNETES_SERVICE_HOST",
            "10.0.0.1",
        )]));
        assert_eq!(only_host.address(), None);

        let only_port = ApiServerOverride::from_lookup(lookup_from(&[(
            "KUBERNETES_SERVICE_PORT_HTTPS",
            "443",
        )]));
        assert_eq!(only_port.address(), None);
    }

    #[test]
    fn test_override_ignores_empty_values() {
        let over = ApiServerOverride::from_lookup(lookup_from(&[
            ("KUBERNETES_SERVICE_HOST", ""),
            ("KUBERNETES_SERVICE_PORT_HTTPS", "443"),
        ]));
        assert_eq!(over.address(), None);
    }

    #[test]
    fn test_override_joins_host_and_port() {
        let over = ApiServerOverride::from_lookup(lookup_from(&[
            ("KUBERNETES_SERVICE_HOST", "10.245.0.1"),
            ("KUBERNETES_SERVICE_PORT_HTTPS", "443"),
        ]));
        assert_eq!(over.address(), Some("10.245.0.1:443"));
    }

    #[test]
    fn test_override_brackets_ipv6() {
        let over = ApiServerOverride::new("fd00::1", "6443");
        assert_eq!(over.address(), Some("[fd00::1]:6443"));
    }

    #[test]
    fn test_default_config_paths() {
        let config = Config::default();
        assert_eq!(config.bootstrap_kubeconfig, PathBuf::from("bootstrap-kubeconfig"));
        assert_eq!(config.ca_cert_path, PathBuf::from("ca-certificates.crt"));
        assert_eq!(config.kubelet_cert_path, PathBuf::from("kubelet.crt"));
        assert_eq!(config.kubelet_key_path, PathBuf::from("kubelet.key"));
        assert!(config.metadata_file.is_none());
    }
}
