// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixtures shared by the unit tests.

use crate::config::Config;
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;

pub const CA_PEM: &str = concat!(
    "-----BEGIN CERTIFICATE-----\n",
    "MIIBszCCAVmgAwIBAgIUTESTCA\n",
    "-----END CERTIFICATE-----\n",
);

pub fn b64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// DigitalOcean user-data as served by the droplet metadata service
pub fn digitalocean_user_data(ca: &str, token: &str, master: &str) -> String {
    let ca_block: String = ca.lines().map(|l| format!("  {}\n", l)).collect();
    format!(
        concat!(
            "#cloud-config\n",
            "k8saas_role: kubelet\n",
            "k8saas_ca_cert: |\n{}",
            "k8saas_bootstrap_token: {}\n",
            "k8saas_master_domain_name: {}\n",
            "k8saas_proxy_token: ignored\n",
        ),
        ca_block, token, master
    )
}

/// GKE kube-env with base64 encoded credentials
pub fn gke_kube_env(ca: &str, cert: &str, key: &str, master: &str) -> String {
    format!(
        concat!(
            "ALLOCATE_NODE_CIDRS: \"true\"\n",
            "CA_CERT: {}\n",
            "KUBELET_CERT: {}\n",
            "KUBELET_KEY: {}\n",
            "KUBERNETES_MASTER_NAME: {}\n",
            "ENABLE_NODE_PROBLEM_DETECTOR: standalone\n",
        ),
        ca, cert, key, master
    )
}

/// Config that writes every artifact into `dir`
pub fn config_in(dir: &Path) -> Config {
    Config {
        bootstrap_kubeconfig: dir.join("bootstrap-kubeconfig"),
        ca_cert_path: dir.join("ca-certificates.crt"),
        kubelet_cert_path: dir.join("kubelet.crt"),
        kubelet_key_path: dir.join("kubelet.key"),
        ..Default::default()
    }
}
