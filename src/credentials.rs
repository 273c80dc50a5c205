// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Decoding and writing of credential material (CA cert, kubelet cert and key)

use crate::constants::mode;
use crate::error::{BootstrapError, Result};
use base64::{engine::general_purpose, Engine as _};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Credential field as it appears in the provider record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// PEM text stored verbatim
    Plain(String),
    /// base64 encoded PEM
    Base64(String),
}

impl Payload {
    fn decode(&self, field: &'static str) -> Result<Vec<u8>> {
        match self {
            Payload::Plain(text) => Ok(text.clone().into_bytes()),
            Payload::Base64(encoded) => {
                // Line breaks are tolerated, anything else outside the alphabet is not
                let compact: String = encoded
                    .chars()
                    .filter(|c| !c.is_ascii_whitespace())
                    .collect();
                general_purpose::STANDARD
                    .decode(compact)
                    .map_err(|source| BootstrapError::Decode { field, source })
            }
        }
    }
}

/// A credential extracted from the record that has not been decoded yet
#[derive(Debug, Clone)]
pub struct PendingCredential {
    pub artifact: &'static str,
    /// Record key, used in decode errors
    pub field: &'static str,
    pub path: PathBuf,
    pub payload: Payload,
}

impl PendingCredential {
    pub fn decode(self) -> Result<CredentialFile> {
        debug!("decoding {}", self.artifact);
        let contents = self.payload.decode(self.field)?;
        Ok(CredentialFile {
            artifact: self.artifact,
            path: self.path,
            contents,
        })
    }
}

/// Decoded credential ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFile {
    pub artifact: &'static str,
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl CredentialFile {
    pub fn write(&self) -> Result<()> {
        info!("writing {} to: {}", self.artifact, self.path.display());
        write_with_mode(&self.path, &self.contents, mode::CREDENTIAL, self.artifact)
    }
}

/// Decode and write each credential in order. A failure stops the run; files
/// written before it are left in place.
pub fn materialize(pending: Vec<PendingCredential>) -> Result<Vec<CredentialFile>> {
    let mut written = Vec::with_capacity(pending.len());
    for credential in pending {
        let file = credential.decode()?;
        file.write()?;
        written.push(file);
    }
    Ok(written)
}

/// Write `contents` to `path`, replacing any existing file. On unix a new file
/// is created with `mode`, and an existing one is switched to `mode` before
/// any contents land in it.
pub(crate) fn write_with_mode(
    path: &Path,
    contents: &[u8],
    mode: u32,
    artifact: &'static str,
) -> Result<()> {
    let write_error = |source| BootstrapError::Write {
        artifact,
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let mut file = options.open(path).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(mode)).map_err(write_error)?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    file.write_all(contents).map_err(write_error)?;
    file.sync_all().map_err(write_error)
}
