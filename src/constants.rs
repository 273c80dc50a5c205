// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Fixed entry names in the generated bootstrap-kubeconfig
pub mod kubeconfig {
    pub const CLUSTER: &str = "local";
    pub const USER: &str = "kubelet";
    pub const CONTEXT: &str = "service-account-context";
    pub const API_VERSION: &str = "v1";
    pub const KIND: &str = "Config";
}

/// In-cluster service discovery variables, as injected into every pod
pub mod env {
    pub const SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
    pub const SERVICE_PORT_HTTPS: &str = "KUBERNETES_SERVICE_PORT_HTTPS";
}

/// Instance metadata endpoints
pub mod metadata {
    pub const DIGITALOCEAN_USER_DATA: &str = "http://169.254.169.254/metadata/v1/user-data";
    pub const GKE_KUBE_ENV: &str =
        "http://metadata.google.internal/computeMetadata/v1/instance/attributes/kube-env";
    /// GCE refuses metadata requests that do not carry this header
    pub const GKE_FLAVOR_HEADER: (&str, &str) = ("Metadata-Flavor", "Google");
    pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
}

/// File modes for written artifacts
pub mod mode {
    pub const CREDENTIAL: u32 = 0o644;
    pub const KUBECONFIG: u32 = 0o600;
}

pub const GENERATE_HINT: &str = "now generate a new node certificate with: kubeletmein generate";
