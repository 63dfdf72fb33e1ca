//! Drive inventory: one `DriveRecord` per drive entry, bucketed by set.

use super::{state_opt, str_opt, u32_opt, u64_opt};
use crate::models::cluster::ServerEntry;
use crate::models::drive::{DriveRecord, SetKey};
use crate::util::capacity::health_pct;
use crate::util::endpoint::path_from_endpoint;
use serde_json::Value;
use std::collections::HashMap;

/// Cluster-wide counters over every drive, before any view filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterTallies {
    pub total_disks:    usize,
    pub scanning_disks: usize,
    pub ok_disks:       usize,
    /// Drives whose state is anything but `ok`, including missing.
    pub bad_disks:      usize,
    pub total_space:    u64,
    pub used_space:     u64,
}

impl ClusterTallies {
    fn record(&mut self, d: &DriveRecord) {
        self.total_disks += 1;
        if d.scanning { self.scanning_disks += 1; }
        if d.is_ok() { self.ok_disks += 1; } else { self.bad_disks += 1; }
        self.total_space = self.total_space.saturating_add(d.total_space);
        self.used_space  = self.used_space.saturating_add(d.used_space);
    }

    pub fn health_pct(&self) -> f64 {
        health_pct(self.ok_disks, self.total_disks)
    }
}

/// Every drive of the snapshot in server order, plus a set index.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    drives:  Vec<DriveRecord>,
    by_set:  HashMap<SetKey, Vec<usize>>,
    tallies: ClusterTallies,
}

impl Inventory {
    pub fn build(servers: &[ServerEntry]) -> Self {
        let mut inv = Self::default();
        for server in servers {
            for entry in &server.drives {
                let drive = drive_record(&server.endpoint, entry);
                inv.tallies.record(&drive);
                inv.by_set.entry(drive.set_key()).or_default().push(inv.drives.len());
                inv.drives.push(drive);
            }
        }
        inv
    }

    pub fn drives(&self) -> &[DriveRecord] {
        &self.drives
    }

    pub fn tallies(&self) -> &ClusterTallies {
        &self.tallies
    }

    pub fn len(&self) -> usize {
        self.drives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    /// Drives of one erasure set, in inventory order.
    pub fn set_drives(&self, key: SetKey) -> Vec<&DriveRecord> {
        self.set_drives_where(key, |_| true)
    }

    pub fn set_drives_where<F>(&self, key: SetKey, pred: F) -> Vec<&DriveRecord>
    where
        F: Fn(&DriveRecord) -> bool,
    {
        self.by_set
            .get(&key)
            .map(|idx| idx.iter().map(|&i| &self.drives[i]).filter(|d| pred(d)).collect())
            .unwrap_or_default()
    }
}

/// Normalize one raw drive entry belonging to `server`.
pub fn drive_record(server: &str, v: &Value) -> DriveRecord {
    let path = str_opt(&v["path"])
        .or_else(|| v["endpoint"].as_str().map(path_from_endpoint))
        .unwrap_or_default();

    let scanning = v["scanning"]
        .as_bool()
        .or_else(|| v["healing"].as_bool())
        .unwrap_or(false);

    let metrics = match &v["metrics"] {
        Value::Null => None,
        Value::Object(m) if m.is_empty() => None,
        Value::Array(a) if a.is_empty() => None,
        other => Some(other.clone()),
    };

    DriveRecord {
        server:          server.to_string(),
        path,
        state:           state_opt(&v["state"]),
        uuid:            str_opt(&v["uuid"]),
        scanning,
        disk_index:      u64_opt(&v["disk_index"]),
        total_space:     u64_opt(&v["totalspace"]).unwrap_or(0),
        used_space:      u64_opt(&v["usedspace"]).unwrap_or(0),
        available_space: u64_opt(&v["availspace"]).unwrap_or(0),
        used_inodes:     u64_opt(&v["used_inodes"]).unwrap_or(0),
        free_inodes:     u64_opt(&v["free_inodes"]).unwrap_or(0),
        local:           v["local"].as_bool().unwrap_or(false),
        pool_index:      u32_opt(&v["pool_index"]).unwrap_or(0),
        set_index:       u32_opt(&v["set_index"]).unwrap_or(0),
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server(endpoint: &str, drives: Vec<Value>) -> ServerEntry {
        ServerEntry { endpoint: endpoint.into(), drives, ..Default::default() }
    }

    #[test]
    fn test_defaults_for_sparse_entry() {
        let d = drive_record("node1:9000", &json!({}));
        assert_eq!(d.server, "node1:9000");
        assert_eq!(d.path, "");
        assert_eq!(d.state, None);
        assert_eq!(d.state_label(), "unknown");
        assert_eq!(d.disk_index, None);
        assert_eq!((d.pool_index, d.set_index), (0, 0));
        assert_eq!(d.total_space, 0);
        assert!(!d.scanning && !d.local);
        assert!(d.metrics.is_none());
    }

    #[test]
    fn test_padded_state_is_not_ok() {
        let d = drive_record("s", &json!({ "state": " ok " }));
        assert!(!d.is_ok());
        assert!(drive_record("s", &json!({ "state": "ok" })).is_ok());

        let inv = Inventory::build(&[server("s", vec![json!({ "state": "ok" }), json!({ "state": "ok " })])]);
        assert_eq!((inv.tallies().ok_disks, inv.tallies().bad_disks), (1, 1));
        assert_eq!(inv.tallies().health_pct(), 50.0);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let d = drive_record("s", &json!({ "totalspace": "lots", "usedspace": -5, "pool_index": "1" }));
        assert_eq!(d.total_space, 0);
        assert_eq!(d.used_space, 0);
        assert_eq!(d.pool_index, 0);
    }

    #[test]
    fn test_path_derived_from_endpoint() {
        let d = drive_record("s", &json!({ "endpoint": "https://node1.example.com:9000/data1/minio" }));
        assert_eq!(d.path, "/data1/minio");
        let d = drive_record("s", &json!({ "endpoint": "https://node1:21000/hadoop/data3/minio" }));
        assert_eq!(d.path, "data3/minio");
        let d = drive_record("s", &json!({ "path": "/mnt/a", "endpoint": "https://n:9000/other" }));
        assert_eq!(d.path, "/mnt/a");
    }

    #[test]
    fn test_scanning_falls_back_to_healing() {
        assert!(drive_record("s", &json!({ "healing": true })).scanning);
        assert!(!drive_record("s", &json!({ "scanning": false, "healing": true })).scanning);
    }

    #[test]
    fn test_empty_metrics_dropped() {
        assert!(drive_record("s", &json!({ "metrics": {} })).metrics.is_none());
        assert!(drive_record("s", &json!({ "metrics": { "totalWrites": 3 } })).metrics.is_some());
    }

    #[test]
    fn test_tallies_count_every_drive() {
        let servers = vec![
            server("a", vec![
                json!({ "state": "ok", "scanning": true, "totalspace": 100, "usedspace": 10 }),
                json!({ "state": "offline", "totalspace": 100, "usedspace": 20 }),
            ]),
            server("b", vec![json!({ "totalspace": 50 })]),
        ];
        let inv = Inventory::build(&servers);
        assert_eq!(*inv.tallies(), ClusterTallies {
            total_disks:    3,
            scanning_disks: 1,
            ok_disks:       1,
            bad_disks:      2,
            total_space:    250,
            used_space:     30,
        });
        assert!((inv.tallies().health_pct() - 33.333).abs() < 0.01);
    }

    #[test]
    fn test_bucketing_by_set() {
        let servers = vec![
            server("a", vec![
                json!({ "pool_index": 0, "set_index": 1, "disk_index": 0 }),
                json!({ "pool_index": 0, "set_index": 0, "disk_index": 1 }),
            ]),
            server("b", vec![json!({ "pool_index": 0, "set_index": 1, "disk_index": 2, "scanning": true })]),
        ];
        let inv = Inventory::build(&servers);
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.set_drives(SetKey::new(0, 1)).len(), 2);
        assert_eq!(inv.set_drives(SetKey::new(0, 0)).len(), 1);
        assert!(inv.set_drives(SetKey::new(3, 3)).is_empty());
        let scanning = inv.set_drives_where(SetKey::new(0, 1), |d| d.scanning);
        assert_eq!(scanning.len(), 1);
        assert_eq!(scanning[0].server, "b");
    }
}
