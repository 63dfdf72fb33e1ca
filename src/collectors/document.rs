//! Schema normalization: find the `info` container in a diagnostic snapshot.
//!
//! Two layouts are recognized, tried in order: the health-diagnostic bundle
//! (`minio.info`) and the plain admin-info dump (`info`). Files that are not a
//! single JSON value are read as newline-delimited JSON and the first matching
//! record wins.

use super::{state_opt, str_opt, u32_opt, u64_opt};
use crate::error::{ReportError, Result};
use crate::models::cluster::{BackendInfo, ClusterDocument, ClusterInfo, ScannerCounts, ServerEntry};
use crate::models::drive::SetKey;
use crate::models::topology::PoolTopology;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Record header some exporters write in front of the payload.
const VERSION_PREFIX: &str = r#"{"version":"3"}"#;

/// A recognized layout: a name plus a locator for its info container.
struct Shape {
    name:   &'static str,
    locate: fn(&Value) -> Option<&Value>,
}

fn locate_minio_info(v: &Value) -> Option<&Value> {
    v.get("minio")?.get("info").filter(|i| i.is_object())
}

fn locate_info(v: &Value) -> Option<&Value> {
    v.get("info").filter(|i| i.is_object())
}

const SHAPES: &[Shape] = &[
    Shape { name: "minio.info", locate: locate_minio_info },
    Shape { name: "info",       locate: locate_info },
];

fn match_shape(root: &Value) -> Option<(&'static str, &Value)> {
    SHAPES
        .iter()
        .find_map(|shape| (shape.locate)(root).map(|container| (shape.name, container)))
}

/// Read and normalize the snapshot at `path`.
pub fn load(path: &Path) -> Result<ClusterDocument> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ReportError::NotFound { path: path.to_path_buf() });
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(ReportError::Parse { path: path.to_path_buf(), reason: e.to_string() });
        }
        Err(e) => return Err(e.into()),
    };
    parse_str(&text, path)
}

/// Normalize snapshot text; `origin` only labels errors.
pub fn parse_str(text: &str, origin: &Path) -> Result<ClusterDocument> {
    let stripped = strip_version_prefix(text);
    // A lone version record is still a document, just an unrecognized one.
    let body = if stripped.trim().is_empty() { text } else { stripped };

    match serde_json::from_str::<Value>(body) {
        Ok(root) => {
            if let Some((shape, container)) = match_shape(&root) {
                return build(&root, shape, container);
            }
            debug!("top-level value has no info container; scanning lines");
            match scan_lines(body) {
                LineScan::Found(doc) => doc,
                _ => Err(ReportError::Schema { keys: top_level_keys(&root) }),
            }
        }
        Err(err) => {
            debug!(error = %err, "not a single JSON document; trying newline-delimited JSON");
            match scan_lines(body) {
                LineScan::Found(doc) => doc,
                LineScan::Unmatched(first) => Err(ReportError::Schema { keys: top_level_keys(&first) }),
                LineScan::NoJson => Err(ReportError::Parse {
                    path:   origin.to_path_buf(),
                    reason: err.to_string(),
                }),
            }
        }
    }
}

fn strip_version_prefix(text: &str) -> &str {
    text.trim_start().strip_prefix(VERSION_PREFIX).unwrap_or(text)
}

enum LineScan {
    Found(Result<ClusterDocument>),
    /// Some lines were JSON, none matched; carries the first one.
    Unmatched(Value),
    NoJson,
}

fn scan_lines(body: &str) -> LineScan {
    let mut first: Option<Value> = None;
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() { continue; }
        let value: Value = match serde_json::from_str(line) {
            Ok(v)  => v,
            Err(_) => continue,
        };
        if let Some((shape, container)) = match_shape(&value) {
            return LineScan::Found(build(&value, shape, container));
        }
        first.get_or_insert(value);
    }
    match first {
        Some(v) => LineScan::Unmatched(v),
        None    => LineScan::NoJson,
    }
}

fn top_level_keys(v: &Value) -> Vec<String> {
    match v {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(_)    => vec!["<array>".into()],
        _                  => vec![format!("<{}>", kind(v))],
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null      => "null",
        Value::Bool(_)   => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_)  => "array",
        Value::Object(_) => "object",
    }
}

fn build(root: &Value, shape: &'static str, container: &Value) -> Result<ClusterDocument> {
    let servers = container["servers"]
        .as_array()
        .ok_or_else(|| ReportError::Schema { keys: top_level_keys(root) })?;

    let servers: Vec<ServerEntry> = servers
        .iter()
        .enumerate()
        .filter_map(|(i, s)| {
            if !s.is_object() {
                warn!(index = i, "skipping server entry that is not an object");
                return None;
            }
            Some(parse_server(s))
        })
        .collect();

    debug!(shape, servers = servers.len(), "matched diagnostic layout");

    let info = ClusterInfo {
        deployment_id: str_opt(&container["deploymentID"]),
        pools:         container.get("pools").filter(|p| !p.is_null()).map(parse_pools),
        backend:       container.get("backend").filter(|b| b.is_object()).map(parse_backend),
        scanner:       parse_scanner(container),
    };

    Ok(ClusterDocument { servers, info, shape })
}

fn parse_server(v: &Value) -> ServerEntry {
    let env_vars = v["minio_env_vars"]
        .as_object()
        .map(|m| {
            m.iter()
                .filter_map(|(k, val)| Some((k.clone(), val.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();

    ServerEntry {
        endpoint:    str_opt(&v["endpoint"]).unwrap_or_else(|| "unknown".to_string()),
        env_vars,
        drives:      v["drives"].as_array().cloned().unwrap_or_default(),
        state:       state_opt(&v["state"]),
        edition:     str_opt(&v["edition"]),
        version:     str_opt(&v["version"]),
        commit_id:   str_opt(&v["commitID"]),
        mem_alloc:   u64_opt(&v["mem_stats"]["Alloc"]),
        ilm_expiry:  v["ilmExpiryInProgress"].as_bool().unwrap_or(false),
        uptime_secs: u64_opt(&v["uptime"]),
    }
}

/// Objects keyed by decimal index, or arrays indexed by position.
fn indexed_entries(v: &Value) -> Vec<(u32, &Value)> {
    match v {
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, val)| match k.trim().parse::<u32>() {
                Ok(i)  => Some((i, val)),
                Err(_) => {
                    warn!(key = %k, "ignoring non-numeric pool/set key");
                    None
                }
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(i, val)| u32::try_from(i).ok().map(|i| (i, val)))
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_pools(v: &Value) -> PoolTopology {
    let mut topo = PoolTopology::new();
    for (pool, sets) in indexed_entries(v) {
        topo.insert_pool(pool);
        for (set, _) in indexed_entries(sets) {
            topo.insert(SetKey::new(pool, set));
        }
    }
    topo
}

fn u64_list(v: &Value) -> Vec<u64> {
    v.as_array()
        .map(|a| a.iter().filter_map(u64_opt).collect())
        .unwrap_or_default()
}

fn parse_backend(v: &Value) -> BackendInfo {
    BackendInfo {
        backend_type:       str_opt(&v["backendType"]),
        standard_sc_parity: u32_opt(&v["standardSCParity"]),
        rr_sc_parity:       u32_opt(&v["rrSCParity"]),
        total_sets:         u64_list(&v["totalSets"]),
        drives_per_set:     u64_list(&v["totalDrivesPerSet"]),
    }
}

fn parse_scanner(container: &Value) -> Option<ScannerCounts> {
    const KEYS: [&str; 5] = ["buckets", "objects", "versions", "deletemarkers", "usage"];
    if !KEYS.iter().any(|k| container.get(*k).is_some()) {
        return None;
    }
    let count = |key: &str| u64_opt(&container[key]["count"]).unwrap_or(0);
    Some(ScannerCounts {
        buckets:        count("buckets"),
        objects:        count("objects"),
        versions:       count("versions"),
        delete_markers: count("deletemarkers"),
        usage_bytes:    u64_opt(&container["usage"]["size"]).unwrap_or(0),
    })
}
