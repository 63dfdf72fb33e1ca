//! Erasure-coding parity: how many drives per set are reserved for parity.

use crate::models::cluster::{BackendInfo, ServerEntry};
use std::fmt;
use tracing::debug;

pub const DEFAULT_PARITY: u32 = 2;

/// Environment variable carrying the standard storage class, e.g. `EC:4`.
pub const STORAGE_CLASS_ENV: &str = "MINIO_STORAGE_CLASS_STANDARD";

/// Parse `EC:<n>`; anything after a second colon is ignored.
pub fn parse_ec(value: &str) -> Option<u32> {
    value
        .trim()
        .strip_prefix("EC:")?
        .split(':')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// First parseable storage-class parity across servers, in server order.
pub fn parity_from_env(servers: &[ServerEntry]) -> Option<u32> {
    servers
        .iter()
        .filter_map(|s| s.env_vars.get(STORAGE_CLASS_ENV))
        .find_map(|v| parse_ec(v))
}

/// Parity from server environments, falling back to the default.
pub fn infer_parity(servers: &[ServerEntry]) -> u32 {
    parity_from_env(servers).unwrap_or(DEFAULT_PARITY)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParitySource {
    Environment,
    Backend,
    Default,
}

impl fmt::Display for ParitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParitySource::Environment => "environment",
            ParitySource::Backend     => "backend",
            ParitySource::Default     => "default",
        })
    }
}

/// Parity disks per erasure set, global to the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityConfig {
    pub disks:  u32,
    pub source: ParitySource,
}

impl ParityConfig {
    pub fn new(disks: u32) -> Self {
        Self { disks, source: ParitySource::Default }
    }

    /// Environment first, then a positive `backend.standardSCParity`, then the default.
    pub fn resolve(servers: &[ServerEntry], backend: Option<&BackendInfo>) -> Self {
        let resolved = if let Some(disks) = parity_from_env(servers) {
            Self { disks, source: ParitySource::Environment }
        } else if let Some(disks) = backend.and_then(|b| b.standard_sc_parity).filter(|p| *p > 0) {
            Self { disks, source: ParitySource::Backend }
        } else {
            Self::new(DEFAULT_PARITY)
        };
        debug!(parity = resolved.disks, source = %resolved.source, "resolved erasure-coding parity");
        resolved
    }
}
