// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Local file fallback for the metadata blob

use super::RawBlob;
use crate::error::{BootstrapError, Result};
use std::path::Path;

pub async fn fetch_from_file(path: &Path) -> Result<RawBlob> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| BootstrapError::Retrieval {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(RawBlob::new(bytes))
}
