// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provider adapters: each one understands the metadata layout of a single
//! managed Kubernetes offering.

pub mod digitalocean;
pub mod generic;
pub mod gke;

use crate::config::{ApiServerOverride, Config};
use crate::credentials::PendingCredential;
use crate::error::{BootstrapError, Result};
use crate::metadata::{MetadataEndpoint, RawBlob};
use kube::config::Kubeconfig;
use serde::de::DeserializeOwned;
use std::fmt;

pub use digitalocean::DigitalOcean;
pub use generic::Generic;
pub use gke::Gke;

/// Turns a provider's metadata blob into credential files and a kubeconfig
pub trait ProviderAdapter {
    /// Structured view of the metadata blob
    type Record: DeserializeOwned;

    /// Name of the metadata document, used in error messages
    const DOCUMENT: &'static str;

    /// Default metadata service endpoint, if the provider has one
    fn metadata_endpoint() -> Result<Option<MetadataEndpoint>>;

    fn parse(blob: &RawBlob) -> Result<Self::Record> {
        parse_yaml(blob, Self::DOCUMENT)
    }

    /// Credentials to write, CA certificate first
    fn credentials(record: &Self::Record, config: &Config) -> Result<Vec<PendingCredential>>;

    fn assemble(
        record: &Self::Record,
        config: &Config,
        api_override: &ApiServerOverride,
    ) -> Result<Kubeconfig>;
}

/// Supported providers, one per CLI subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    DigitalOcean,
    Gke,
    Generic,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::DigitalOcean => "do",
            Provider::Gke => "gke",
            Provider::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Unmarshal YAML into `T`. Unknown keys are ignored, declared keys must
/// have the declared type.
pub fn parse_yaml<T: DeserializeOwned>(blob: &RawBlob, document: &'static str) -> Result<T> {
    if blob.is_empty() {
        return Err(BootstrapError::Parse {
            document,
            message: "document is empty".to_string(),
        });
    }

    serde_yaml::from_slice(blob.as_bytes()).map_err(|e| BootstrapError::Parse {
        document,
        message: e.to_string(),
    })
}

/// Borrow a required field, treating null and blank values as absent
pub(crate) fn require<'a>(
    value: &'a Option<String>,
    field: &'static str,
    document: &'static str,
) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .ok_or(BootstrapError::MissingField { field, document })
}
