// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fallback for clouds without a dedicated adapter: a YAML document with a
//! PEM CA certificate, a bootstrap token and the API server address, read
//! from `--metadata-file` or `--metadata-url`.

use super::{require, ProviderAdapter};
use crate::config::{ApiServerOverride, Config};
use crate::credentials::{Payload, PendingCredential};
use crate::error::{BootstrapError, Result};
use crate::kubeconfig::{assemble, resolve_host, ClientAuth};
use crate::metadata::MetadataEndpoint;
use kube::config::Kubeconfig;
use serde::Deserialize;
use url::Url;

const DOCUMENT: &str = "metadata";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BootstrapMetadata {
    pub ca_cert: Option<String>,
    pub bootstrap_token: Option<String>,
    pub api_server: Option<String>,
}

pub struct Generic;

impl ProviderAdapter for Generic {
    type Record = BootstrapMetadata;

    const DOCUMENT: &'static str = DOCUMENT;

    fn metadata_endpoint() -> Result<Option<MetadataEndpoint>> {
        Ok(None)
    }

    fn credentials(record: &BootstrapMetadata, config: &Config) -> Result<Vec<PendingCredential>> {
        let ca_cert = require(&record.ca_cert, "ca_cert", DOCUMENT)?;

        Ok(vec![PendingCredential {
            artifact: "ca cert",
            field: "ca_cert",
            path: config.ca_cert_path.clone(),
            payload: Payload::Plain(ca_cert.to_string()),
        }])
    }

    fn assemble(
        record: &BootstrapMetadata,
        config: &Config,
        api_override: &ApiServerOverride,
    ) -> Result<Kubeconfig> {
        let token = require(&record.bootstrap_token, "bootstrap_token", DOCUMENT)?;
        let host = resolve_host(api_override, || {
            require(&record.api_server, "api_server", DOCUMENT).and_then(api_server_host)
        })?;

        Ok(assemble(
            &host,
            &config.ca_cert_path,
            ClientAuth::Token(token.trim().to_string()),
        ))
    }
}

/// `host[:port]` from `api_server`, given either bare or as an https URL
/// without a path
fn api_server_host(server: &str) -> Result<String> {
    let invalid = |message: String| BootstrapError::InvalidField {
        field: "api_server",
        document: DOCUMENT,
        message,
    };

    let server = server.trim();
    if !server.contains("://") {
        let host = server.trim_end_matches('/');
        if host.contains('/') {
            return Err(invalid(format!("{} is not a host[:port]", server)));
        }
        return Ok(host.to_string());
    }

    let url = Url::parse(server).map_err(|e| invalid(format!("{}: {}", server, e)))?;
    if url.scheme() != "https" {
        return Err(invalid(format!("scheme must be https, got {}", url.scheme())));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid(format!("{} must not carry a path", server)));
    }

    let host = url
        .host_str()
        .ok_or_else(|| invalid(format!("{} has no host", server)))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
