// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Instance metadata service client

use super::RawBlob;
use crate::error::{BootstrapError, Result};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// A metadata URL plus the headers the provider insists on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataEndpoint {
    url: Url,
    headers: Vec<(&'static str, &'static str)>,
}

impl MetadataEndpoint {
    pub fn parse(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| BootstrapError::Config(format!("invalid metadata URL {}: {}", url, e)))?;
        Ok(Self::new(url))
    }

    pub fn new(url: Url) -> Self {
        MetadataEndpoint {
            url,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn with_url(self, url: Url) -> Self {
        MetadataEndpoint { url, ..self }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(&'static str, &'static str)] {
        &self.headers
    }
}

#[instrument(skip(endpoint), fields(url = %endpoint.url()))]
pub async fn fetch_from_service(endpoint: &MetadataEndpoint, timeout: Duration) -> Result<RawBlob> {
    let retrieval_error = |message: String| BootstrapError::Retrieval {
        origin: endpoint.url().to_string(),
        message,
    };

    // Metadata endpoints are link-local and never proxied
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .map_err(|e| retrieval_error(e.to_string()))?;

    let mut request = client.get(endpoint.url().clone());
    for (name, value) in endpoint.headers() {
        request = request.header(*name, *value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| retrieval_error(e.to_string()))?;

    let status = response.status();
    debug!("metadata service responded with {}", status);
    if !status.is_success() {
        return Err(retrieval_error(format!("unexpected status {}", status)));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| retrieval_error(e.to_string()))?;

    Ok(RawBlob::new(body.to_vec()))
}
