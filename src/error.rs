//! Error taxonomy for report generation.
//!
//! Every variant is fatal: the run stops and the binary exits with status 1.
//! Malformed per-drive fields and parity strings are absorbed by the
//! collectors and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Bad flag combination or value on the command line.
    #[error("{0}")]
    Usage(String),

    #[error("file '{}' not found", path.display())]
    NotFound { path: PathBuf },

    /// Neither a single JSON document nor newline-delimited JSON.
    #[error("file '{}' is not valid JSON: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Valid JSON, but no `minio.info` / `info` container with a `servers` array.
    #[error(
        "could not find servers in JSON structure (expected `minio.info.servers` or `info.servers`); available top-level keys: [{}]",
        keys.join(", ")
    )]
    Schema { keys: Vec<String> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
