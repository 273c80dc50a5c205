// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("unable to fetch metadata from {origin}: {message}")]
    Retrieval { origin: String, message: String },

    #[error("unable to parse YAML from {document}: {message}")]
    Parse {
        document: &'static str,
        message: String,
    },

    #[error("unable to decode {field}: {source}")]
    Decode {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    #[error("required field {field} is missing from {document}")]
    MissingField {
        field: &'static str,
        document: &'static str,
    },

    #[error("invalid {field} in {document}: {message}")]
    InvalidField {
        field: &'static str,
        document: &'static str,
        message: String,
    },

    #[error("unable to write {artifact} to {}: {source}", path.display())]
    Write {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to serialize bootstrap-kubeconfig: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
