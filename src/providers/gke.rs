// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! GKE: the `kube-env` instance attribute holds base64 encoded CA, kubelet
//! certificate and kubelet key.

use super::{require, ProviderAdapter};
use crate::config::{ApiServerOverride, Config};
use crate::constants::metadata;
use crate::credentials::{Payload, PendingCredential};
use crate::error::Result;
use crate::kubeconfig::{assemble, ClientAuth};
use crate::metadata::MetadataEndpoint;
use kube::config::Kubeconfig;
use serde::Deserialize;

const DOCUMENT: &str = "kube-env";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct KubeEnv {
    #[serde(rename = "CA_CERT")]
    pub ca_cert: Option<String>,
    #[serde(rename = "KUBELET_CERT")]
    pub kubelet_cert: Option<String>,
    #[serde(rename = "KUBELET_KEY")]
    pub kubelet_key: Option<String>,
    #[serde(rename = "KUBERNETES_MASTER_NAME")]
    pub master_name: Option<String>,
}

pub struct Gke;

impl ProviderAdapter for Gke {
    type Record = KubeEnv;

    const DOCUMENT: &'static str = DOCUMENT;

    fn metadata_endpoint() -> Result<Option<MetadataEndpoint>> {
        let (name, value) = metadata::GKE_FLAVOR_HEADER;
        MetadataEndpoint::parse(metadata::GKE_KUBE_ENV).map(|e| Some(e.with_header(name, value)))
    }

    fn credentials(record: &KubeEnv, config: &Config) -> Result<Vec<PendingCredential>> {
        let encoded = |value: &Option<String>, field| {
            require(value, field, DOCUMENT).map(|v| Payload::Base64(v.to_string()))
        };

        Ok(vec![
            PendingCredential {
                artifact: "ca cert",
                field: "CA_CERT",
                path: config.ca_cert_path.clone(),
                payload: encoded(&record.ca_cert, "CA_CERT")?,
            },
            PendingCredential {
                artifact: "kubelet cert",
                field: "KUBELET_CERT",
                path: config.kubelet_cert_path.clone(),
                payload: encoded(&record.kubelet_cert, "KUBELET_CERT")?,
            },
            PendingCredential {
                artifact: "kubelet key",
                field: "KUBELET_KEY",
                path: config.kubelet_key_path.clone(),
                payload: encoded(&record.kubelet_key, "KUBELET_KEY")?,
            },
        ])
    }

    /// The master name from kube-env is used as is, the in-cluster override
    /// does not apply here
    fn assemble(
        record: &KubeEnv,
        config: &Config,
        _api_override: &ApiServerOverride,
    ) -> Result<Kubeconfig> {
        let host = require(&record.master_name, "KUBERNETES_MASTER_NAME", DOCUMENT)?.trim();

        Ok(assemble(
            host,
            &config.ca_cert_path,
            ClientAuth::ClientCertificate {
                cert: config.kubelet_cert_path.clone(),
                key: config.kubelet_key_path.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BootstrapError;
    use crate::metadata::RawBlob;
    use crate::test_utils::{b64, gke_kube_env};

    fn record() -> KubeEnv {
        Gke::parse(&RawBlob::from(gke_kube_env(
            &b64(b"ca"),
            &b64(b"cert"),
            &b64(b"key"),
            "35.187.1.2",
        )))
        .unwrap()
    }

    #[test]
    fn test_parse_kube_env() {
        let record = record();
        assert_eq!(record.ca_cert.as_deref(), Some("Y2E="));
        assert_eq!(record.kubelet_cert.as_deref(), Some("Y2VydA=="));
        assert_eq!(record.kubelet_key.as_deref(), Some("a2V5"));
        assert_eq!(record.master_name.as_deref(), Some("35.187.1.2"));
    }

    #[test]
    fn test_credentials_in_fixed_order() {
        let config = Config::default();
        let pending = Gke::credentials(&record(), &config).unwrap();

        let fields: Vec<_> = pending.iter().map(|p| p.field).collect();
        assert_eq!(fields, vec!["CA_CERT", "KUBELET_CERT", "KUBELET_KEY"]);
        assert_eq!(pending[0].path, config.ca_cert_path);
        assert_eq!(pending[1].path, config.kubelet_cert_path);
        assert_eq!(pending[2].path, config.kubelet_key_path);
        assert!(pending.iter().all(|p| matches!(p.payload, Payload::Base64(_))));
    }

    #[test]
    fn test_assemble_ignores_in_cluster_override() {
        let over = ApiServerOverride::new("10.0.0.1", "443");
        let config = Gke::assemble(&record(), &Config::default(), &over).unwrap();

        let cluster = config.clusters[0].cluster.as_ref().unwrap();
        assert_eq!(cluster.server.as_deref(), Some("https://35.187.1.2"));

        let user = config.auth_infos[0].auth_info.as_ref().unwrap();
        assert!(user.token.is_none());
        assert_eq!(user.client_certificate.as_deref(), Some("kubelet.crt"));
        assert_eq!(user.client_key.as_deref(), Some("kubelet.key"));
    }

    #[test]
    fn test_every_required_field_is_reported() {
        let cases: [(&str, fn(&mut KubeEnv)); 3] = [
            ("CA_CERT", |r| r.ca_cert = None),
            ("KUBELET_CERT", |r| r.kubelet_cert = None),
            ("KUBELET_KEY", |r| r.kubelet_key = None),
        ];

        for (expected, clear) in cases {
            let mut record = record();
            clear(&mut record);
            match Gke::credentials(&record, &Config::default()).unwrap_err() {
                BootstrapError::MissingField { field, document } => {
                    assert_eq!(field, expected);
                    assert_eq!(document, "kube-env");
                }
                other => panic!("unexpected error {:?}", other),
            }
        }

        let mut record = record();
        record.master_name = Some(String::new());
        assert!(matches!(
            Gke::assemble(&record, &Config::default(), &ApiServerOverride::default()).unwrap_err(),
            BootstrapError::MissingField { field: "KUBERNETES_MASTER_NAME", .. }
        ));
    }

    #[test]
    fn test_metadata_endpoint_sends_flavor_header() {
        let endpoint = Gke::metadata_endpoint().unwrap().unwrap();
        assert_eq!(endpoint.url().host_str(), Some("metadata.google.internal"));
        assert_eq!(endpoint.headers(), &[("Metadata-Flavor", "Google")]);
    }
}
