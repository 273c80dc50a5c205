// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The bootstrap pipeline: fetch blob, parse, write credentials, write the
//! bootstrap-kubeconfig.

use crate::config::{ApiServerOverride, Config};
use crate::constants::GENERATE_HINT;
use crate::credentials::materialize;
use crate::error::Result;
use crate::kubeconfig::write_kubeconfig;
use crate::metadata::{BlobSource, RawBlob};
use crate::providers::{DigitalOcean, Generic, Gke, Provider, ProviderAdapter};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Files produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub credential_files: Vec<PathBuf>,
    pub kubeconfig: PathBuf,
}

impl Provider {
    /// Fetch the provider's blob and run the pipeline on it
    #[instrument(skip(config, api_override), fields(provider = %self))]
    pub async fn bootstrap(
        self,
        config: &Config,
        api_override: &ApiServerOverride,
    ) -> Result<BootstrapOutcome> {
        let endpoint = match self {
            Provider::DigitalOcean => DigitalOcean::metadata_endpoint()?,
            Provider::Gke => Gke::metadata_endpoint()?,
            Provider::Generic => Generic::metadata_endpoint()?,
        };

        let source = BlobSource::select(config, endpoint)?;
        let blob = source.fetch().await?;
        info!("fetched {} bytes from {}", blob.as_bytes().len(), source.origin());

        self.bootstrap_from_blob(&blob, config, api_override)
    }

    /// Run the pipeline on an already fetched blob
    pub fn bootstrap_from_blob(
        self,
        blob: &RawBlob,
        config: &Config,
        api_override: &ApiServerOverride,
    ) -> Result<BootstrapOutcome> {
        match self {
            Provider::DigitalOcean => run::<DigitalOcean>(blob, config, api_override),
            Provider::Gke => run::<Gke>(blob, config, api_override),
            Provider::Generic => run::<Generic>(blob, config, api_override),
        }
    }
}

/// Parse, assemble, then write. The kubeconfig is assembled before anything
/// touches the disk so a record with missing fields leaves no files behind;
/// a decode or write failure part way through the credentials does.
pub fn run<A: ProviderAdapter>(
    blob: &RawBlob,
    config: &Config,
    api_override: &ApiServerOverride,
) -> Result<BootstrapOutcome> {
    let record = A::parse(blob)?;
    let pending = A::credentials(&record, config)?;
    let kubeconfig = A::assemble(&record, config, api_override)?;

    let written = materialize(pending)?;
    write_kubeconfig(&kubeconfig, &config.bootstrap_kubeconfig)?;
    info!("{}", GENERATE_HINT);

    Ok(BootstrapOutcome {
        credential_files: written.into_iter().map(|f| f.path).collect(),
        kubeconfig: config.bootstrap_kubeconfig.clone(),
    })
}
