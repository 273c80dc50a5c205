// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Retrieval of the raw credential blob, either from a local file or from the
//! cloud instance metadata service.

pub mod file;
pub mod service;

use crate::config::Config;
use crate::error::{BootstrapError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

pub use service::MetadataEndpoint;

/// Bytes fetched from the metadata source, assumed to be YAML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlob(Vec<u8>);

impl RawBlob {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        RawBlob(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(u8::is_ascii_whitespace)
    }
}

impl From<&str> for RawBlob {
    fn from(s: &str) -> Self {
        RawBlob::new(s.as_bytes())
    }
}

impl From<String> for RawBlob {
    fn from(s: String) -> Self {
        RawBlob::new(s.into_bytes())
    }
}

/// Where the blob comes from for this invocation
#[derive(Debug, Clone)]
pub enum BlobSource {
    File(PathBuf),
    Service {
        endpoint: MetadataEndpoint,
        timeout: Duration,
    },
}

impl BlobSource {
    /// A configured metadata file always wins. Otherwise the provider's
    /// endpoint is used, with its URL replaced by `--metadata-url` if given.
    pub fn select(config: &Config, provider_endpoint: Option<MetadataEndpoint>) -> Result<Self> {
        if let Some(path) = &config.metadata_file {
            return Ok(BlobSource::File(path.clone()));
        }

        let endpoint = match (&config.metadata_url, provider_endpoint) {
            (Some(url), Some(endpoint)) => endpoint.with_url(url.clone()),
            (Some(url), None) => MetadataEndpoint::new(url.clone()),
            (None, Some(endpoint)) => endpoint,
            (None, None) => {
                return Err(BootstrapError::Config(
                    "no metadata service for this provider, set --metadata-file or --metadata-url"
                        .to_string(),
                ))
            }
        };

        Ok(BlobSource::Service {
            endpoint,
            timeout: config.timeout,
        })
    }

    pub async fn fetch(&self) -> Result<RawBlob> {
        match self {
            BlobSource::File(path) => {
                info!("fetching kubelet creds from file: {}", path.display());
                file::fetch_from_file(path).await
            }
            BlobSource::Service { endpoint, timeout } => {
                info!("fetching kubelet creds from metadata service");
                service::fetch_from_service(endpoint, *timeout).await
            }
        }
    }

    /// Human readable origin, used in log lines and errors
    pub fn origin(&self) -> String {
        match self {
            BlobSource::File(path) => path.display().to_string(),
            BlobSource::Service { endpoint, .. } => endpoint.url().to_string(),
        }
    }
}
