// src/error.rs

use std::{fmt, path::PathBuf};
use thiserror::Error;

/// Which step of the export pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Parse,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Fetch => "fetch",
            Stage::Parse => "parse",
            Stage::Write => "write",
        })
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("fetch: building HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("fetch: GET {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("fetch: GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("parse: response from {url} is not a list of countries")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("write: encoding country names")]
    Encode(#[source] serde_json::Error),

    #[error("write: {path} could not be written")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn stage(&self) -> Stage {
        match self {
            ExportError::Client(_) | ExportError::Network { .. } | ExportError::Status { .. } => {
                Stage::Fetch
            }
            ExportError::Parse { .. } => Stage::Parse,
            ExportError::Encode(_) | ExportError::Write { .. } => Stage::Write,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;
