// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Command line surface

use crate::config::Config;
use crate::providers::Provider;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Write out a bootstrap kubeconfig for the kubelet LoadClientCert function
#[derive(Parser, Debug)]
#[command(name = "kubeletmein")]
#[command(version)]
pub struct Cli {
    /// The filename to write the bootstrap kubeconfig to
    #[arg(
        short = 'b',
        long,
        global = true,
        default_value = "bootstrap-kubeconfig",
        env = "KUBELETMEIN_BOOTSTRAP_KUBECONFIG"
    )]
    pub bootstrap_kubeconfig: PathBuf,

    /// The filename to write the CA cert to
    #[arg(short = 'a', long, global = true, default_value = "ca-certificates.crt")]
    pub ca_cert: PathBuf,

    /// Read metadata from this file instead of the metadata service
    #[arg(short = 'f', long, global = true)]
    pub metadata_file: Option<PathBuf>,

    /// Fetch metadata from this URL instead of the provider's default endpoint
    #[arg(long, global = true)]
    pub metadata_url: Option<Url>,

    /// Metadata request timeout in seconds
    #[arg(long, global = true, default_value_t = crate::constants::metadata::DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap from DigitalOcean droplet user-data
    #[command(name = "do")]
    DigitalOcean,

    /// Bootstrap from the GKE kube-env instance attribute
    Gke(KubeletCertArgs),

    /// Bootstrap from a generic metadata document (file or URL)
    Generic,
}

#[derive(Args, Debug)]
pub struct KubeletCertArgs {
    /// The filename to write the kubelet cert to
    #[arg(short = 'c', long, default_value = "kubelet.crt")]
    pub kubelet_cert: PathBuf,

    /// The filename to write the kubelet key to
    #[arg(short = 'k', long, default_value = "kubelet.key")]
    pub kubelet_key: PathBuf,
}

impl Cli {
    pub fn provider(&self) -> Provider {
        match self.command {
            Command::DigitalOcean => Provider::DigitalOcean,
            Command::Gke(_) => Provider::Gke,
            Command::Generic => Provider::Generic,
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config {
            bootstrap_kubeconfig: self.bootstrap_kubeconfig.clone(),
            ca_cert_path: self.ca_cert.clone(),
            metadata_file: self.metadata_file.clone(),
            metadata_url: self.metadata_url.clone(),
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        };

        if let Command::Gke(args) = &self.command {
            config.kubelet_cert_path = args.kubelet_cert.clone();
            config.kubelet_key_path = args.kubelet_key.clone();
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_defaults() {
        let cli = Cli::try_parse_from(["kubeletmein", "do"]).unwrap();
        assert_eq!(cli.provider(), Provider::DigitalOcean);

        let config = cli.config();
        assert_eq!(config.ca_cert_path, PathBuf::from("ca-certificates.crt"));
        assert_eq!(config.bootstrap_kubeconfig, PathBuf::from("bootstrap-kubeconfig"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.metadata_file.is_none());
    }

    #[test]
    fn test_gke_flags() {
        let cli = Cli::try_parse_from([
            "kubeletmein",
            "gke",
            "-c",
            "/tmp/k.crt",
            "-k",
            "/tmp/k.key",
            "-f",
            "/tmp/kube-env",
            "-a",
            "/tmp/ca.crt",
        ])
        .unwrap();
        assert_eq!(cli.provider(), Provider::Gke);

        let config = cli.config();
        assert_eq!(config.kubelet_cert_path, PathBuf::from("/tmp/k.crt"));
        assert_eq!(config.kubelet_key_path, PathBuf::from("/tmp/k.key"));
        assert_eq!(config.metadata_file, Some(PathBuf::from("/tmp/kube-env")));
        assert_eq!(config.ca_cert_path, PathBuf::from("/tmp/ca.crt"));
    }

    #[test]
    fn test_kubelet_cert_flags_only_on_gke() {
        assert!(Cli::try_parse_from(["kubeletmein", "do", "-c", "x.crt"]).is_err());
    }

    #[test]
    fn test_metadata_url_is_validated() {
        assert!(Cli::try_parse_from(["kubeletmein", "generic", "--metadata-url", "nope"]).is_err());

        let cli = Cli::try_parse_from([
            "kubeletmein",
            "generic",
            "--metadata-url",
            "http://10.0.0.1/bootstrap",
        ])
        .unwrap();
        assert_eq!(
            cli.config().metadata_url.map(|u| u.to_string()),
            Some("http://10.0.0.1/bootstrap".to_string())
        );
    }
}
