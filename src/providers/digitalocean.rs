// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! DigitalOcean Kubernetes: droplet user-data carries the CA certificate in
//! plain PEM next to a bootstrap token.

use super::{require, ProviderAdapter};
use crate::config::{ApiServerOverride, Config};
use crate::constants::metadata;
use crate::credentials::{Payload, PendingCredential};
use crate::error::Result;
use crate::kubeconfig::{assemble, resolve_host, ClientAuth};
use crate::metadata::MetadataEndpoint;
use kube::config::Kubeconfig;
use serde::Deserialize;

const DOCUMENT: &str = "user-data";

/// Kubernetes related keys of the droplet user-data
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct UserData {
    #[serde(rename = "k8saas_ca_cert")]
    pub ca_cert: Option<String>,
    #[serde(rename = "k8saas_bootstrap_token")]
    pub bootstrap_token: Option<String>,
    #[serde(rename = "k8saas_master_domain_name")]
    pub master_domain_name: Option<String>,
}

pub struct DigitalOcean;

impl ProviderAdapter for DigitalOcean {
    type Record = UserData;

    const DOCUMENT: &'static str = DOCUMENT;

    fn metadata_endpoint() -> Result<Option<MetadataEndpoint>> {
        MetadataEndpoint::parse(metadata::DIGITALOCEAN_USER_DATA).map(Some)
    }

    fn credentials(record: &UserData, config: &Config) -> Result<Vec<PendingCredential>> {
        let ca_cert = require(&record.ca_cert, "k8saas_ca_cert", DOCUMENT)?;

        Ok(vec![PendingCredential {
            artifact: "ca cert",
            field: "k8saas_ca_cert",
            path: config.ca_cert_path.clone(),
            payload: Payload::Plain(ca_cert.to_string()),
        }])
    }

    /// The in-cluster service address wins over the advertised master name
    fn assemble(
        record: &UserData,
        config: &Config,
        api_override: &ApiServerOverride,
    ) -> Result<Kubeconfig> {
        let token = require(&record.bootstrap_token, "k8saas_bootstrap_token", DOCUMENT)?;
        let host = resolve_host(api_override, || {
            require(&record.master_domain_name, "k8saas_master_domain_name", DOCUMENT)
                .map(|h| h.trim().to_string())
        })?;

        Ok(assemble(
            &host,
            &config.ca_cert_path,
            ClientAuth::Token(token.trim().to_string()),
        ))
    }
}
