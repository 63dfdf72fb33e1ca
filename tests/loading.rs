use mdb::error::ReportError;
use mdb::models::drive::SetKey;
use mdb::snapshot::Snapshot;
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Snapshot::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ReportError::NotFound { .. }));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let f = write_fixture("{ this is not json\nnor is this\n");
    assert!(matches!(Snapshot::load(f.path()), Err(ReportError::Parse { .. })));
}

#[test]
fn test_unrecognized_shape_is_schema_error() {
    let f = write_fixture(r#"{"status":"success","result":[]}"#);
    match Snapshot::load(f.path()) {
        Err(ReportError::Schema { keys }) => assert_eq!(keys, vec!["status", "result"]),
        other => panic!("expected schema error, got {:?}", other.map(|s| s.servers.len())),
    }
}

#[test]
fn test_health_bundle_ndjson() {
    let bundle = [
        json!({ "version": "3" }).to_string(),
        json!({ "sys": { "cpus": [] } }).to_string(),
        json!({ "minio": { "info": {
            "deploymentID": "abc",
            "servers": [{
                "endpoint": "node1:9000",
                "minio_env_vars": { "MINIO_STORAGE_CLASS_STANDARD": "EC:4" },
                "drives": [{ "pool_index": 0, "set_index": 0, "state": "ok" }]
            }]
        }}}).to_string(),
    ]
    .join("\n");
    let f = write_fixture(&bundle);
    let snap = Snapshot::load(f.path()).unwrap();
    assert_eq!(snap.info.deployment_id.as_deref(), Some("abc"));
    assert_eq!(snap.parity.disks, 4);
    assert_eq!(snap.inventory.len(), 1);
}

#[test]
fn test_no_env_vars_parity_is_two() {
    let f = write_fixture(&json!({ "info": { "servers": [{ "endpoint": "n1:9000", "drives": [] }] } }).to_string());
    let snap = Snapshot::load(f.path()).unwrap();
    assert_eq!(snap.parity.disks, 2);
}

#[test]
fn test_topology_covers_every_drive() {
    let f = write_fixture(&json!({ "info": {
        "pools": { "0": { "0": {} } },
        "servers": [{ "drives": [
            { "pool_index": 0, "set_index": 0 },
            { "pool_index": 0, "set_index": 3 },
            { "pool_index": 2, "set_index": 1 },
            {},
        ]}]
    }}).to_string());
    let snap = Snapshot::load(f.path()).unwrap();
    for d in snap.inventory.drives() {
        assert!(snap.topology.contains(d.set_key()), "missing {:?}", d.set_key());
    }
    let keys: Vec<SetKey> = snap.topology.keys().collect();
    assert_eq!(keys, vec![SetKey::new(0, 0), SetKey::new(0, 3), SetKey::new(2, 1)]);
}
