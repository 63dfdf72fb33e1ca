use super::topology::PoolTopology;
use serde_json::Value;
use std::collections::HashMap;

/// One server entry of the snapshot. Drive entries stay raw until the
/// inventory pass turns them into `DriveRecord`s.
#[derive(Debug, Clone, Default)]
pub struct ServerEntry {
    pub endpoint:    String,
    pub env_vars:    HashMap<String, String>,
    pub drives:      Vec<Value>,
    pub state:       Option<String>,
    pub edition:     Option<String>,
    pub version:     Option<String>,
    pub commit_id:   Option<String>,
    pub mem_alloc:   Option<u64>,
    pub ilm_expiry:  bool,
    pub uptime_secs: Option<u64>,
}

impl ServerEntry {
    pub fn is_offline(&self) -> bool {
        self.state.as_deref() == Some("offline")
    }
}

/// `info.backend` of the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BackendInfo {
    pub backend_type:       Option<String>,
    pub standard_sc_parity: Option<u32>,
    pub rr_sc_parity:       Option<u32>,
    pub total_sets:         Vec<u64>,
    pub drives_per_set:     Vec<u64>,
}

/// Object-layer counters reported by the scanner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannerCounts {
    pub buckets:        u64,
    pub objects:        u64,
    pub versions:       u64,
    pub delete_markers: u64,
    pub usage_bytes:    u64,
}

/// The normalized `info` container.
#[derive(Debug, Clone, Default)]
pub struct ClusterInfo {
    pub deployment_id: Option<String>,
    /// Explicit topology, when the snapshot carries `pools`.
    pub pools:         Option<PoolTopology>,
    pub backend:       Option<BackendInfo>,
    pub scanner:       Option<ScannerCounts>,
}

/// Output of the schema normalizer.
#[derive(Debug, Clone, Default)]
pub struct ClusterDocument {
    pub servers: Vec<ServerEntry>,
    pub info:    ClusterInfo,
    /// Which shape matched, e.g. `minio.info`.
    pub shape:   &'static str,
}
