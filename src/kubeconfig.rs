// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Assembly and serialization of the bootstrap-kubeconfig

use crate::config::ApiServerOverride;
use crate::constants::{kubeconfig as names, mode};
use crate::credentials::write_with_mode;
use crate::error::{BootstrapError, Result};
use kube::config::{
    AuthInfo, Cluster, Context, Kubeconfig, NamedAuthInfo, NamedCluster, NamedContext,
};
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How the kubelet authenticates to the API server. A provider issues either a
/// bootstrap token or a client certificate, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientAuth {
    Token(String),
    ClientCertificate { cert: PathBuf, key: PathBuf },
}

impl ClientAuth {
    fn into_auth_info(self) -> AuthInfo {
        match self {
            ClientAuth::Token(token) => AuthInfo {
                token: Some(SecretString::from(token)),
                ..Default::default()
            },
            ClientAuth::ClientCertificate { cert, key } => AuthInfo {
                client_certificate: Some(path_string(&cert)),
                client_key: Some(path_string(&key)),
                ..Default::default()
            },
        }
    }
}

/// Pick the API server host: the in-cluster override when active, the
/// record's host otherwise. The record is only consulted without an override.
pub fn resolve_host<F>(api_override: &ApiServerOverride, record_host: F) -> Result<String>
where
    F: FnOnce() -> Result<String>,
{
    match api_override.address() {
        Some(address) => {
            debug!("using in-cluster API server address {}", address);
            Ok(address.to_string())
        }
        None => record_host(),
    }
}

/// Build a kubeconfig with a single cluster, user and context, the context
/// being current
pub fn assemble(host: &str, ca_cert_path: &Path, auth: ClientAuth) -> Kubeconfig {
    Kubeconfig {
        clusters: vec![NamedCluster {
            name: names::CLUSTER.to_string(),
            cluster: Some(Cluster {
                server: Some(format!("https://{}", host)),
                insecure_skip_tls_verify: Some(false),
                certificate_authority: Some(path_string(ca_cert_path)),
                ..Default::default()
            }),
        }],
        auth_infos: vec![NamedAuthInfo {
            name: names::USER.to_string(),
            auth_info: Some(auth.into_auth_info()),
        }],
        contexts: vec![NamedContext {
            name: names::CONTEXT.to_string(),
            context: Some(Context {
                cluster: names::CLUSTER.to_string(),
                user: Some(names::USER.to_string()),
                ..Default::default()
            }),
        }],
        current_context: Some(names::CONTEXT.to_string()),
        kind: Some(names::KIND.to_string()),
        api_version: Some(names::API_VERSION.to_string()),
        ..Default::default()
    }
}

pub fn to_yaml(kubeconfig: &Kubeconfig) -> Result<String> {
    serde_yaml::to_string(kubeconfig).map_err(BootstrapError::Serialize)
}

pub fn write_kubeconfig(kubeconfig: &Kubeconfig, path: &Path) -> Result<()> {
    info!("generating bootstrap-kubeconfig file at: {}", path.display());
    let yaml = to_yaml(kubeconfig)?;
    write_with_mode(path, yaml.as_bytes(), mode::KUBECONFIG, "bootstrap-kubeconfig")?;
    info!("wrote bootstrap-kubeconfig");
    Ok(())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
