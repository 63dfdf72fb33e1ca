use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::{NamedTempFile, TempDir};

/// Run the binary with an empty config directory so a user's `mdb.toml` never leaks in.
fn mdb(args: &[&str]) -> Output {
    let config = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_mdb"))
        .args(args)
        .env("XDG_CONFIG_HOME", config.path())
        .env("HOME", config.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

fn healthy_cluster() -> NamedTempFile {
    write_fixture(&json!({ "info": { "servers": [{
        "endpoint": "node1:9000", "state": "online",
        "drives": [
            { "pool_index": 0, "set_index": 0, "disk_index": 0, "state": "ok", "totalspace": 100, "usedspace": 10 },
            { "pool_index": 0, "set_index": 0, "disk_index": 1, "state": "ok", "totalspace": 100, "usedspace": 10 },
        ]
    }]}}).to_string())
}

fn path_arg(p: &Path) -> &str {
    p.to_str().unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn test_no_file_exits_one() {
    let out = mdb(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("JSON file is required"));
}

#[test]
fn test_missing_file_exits_one() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.json");
    let out = mdb(&[path_arg(&missing)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("not found"));
}

#[test]
fn test_garbage_json_exits_one() {
    let f = write_fixture("{ definitely not json\n}}}\n");
    let out = mdb(&[path_arg(f.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("is not valid JSON"));
}

#[test]
fn test_unknown_shape_exits_one() {
    let f = write_fixture(r#"{"status":"success","result":[]}"#);
    let out = mdb(&[path_arg(f.path())]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("available top-level keys: [status, result]"));
}

#[test]
fn test_bad_low_space_value_exits_one() {
    let f = healthy_cluster();
    let out = mdb(&[path_arg(f.path()), "--summary", "--low-space=abc"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_low_space_without_summary_exits_one() {
    let f = healthy_cluster();
    let out = mdb(&[path_arg(f.path()), "--low-space=10"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("--low-space option requires --summary mode"));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_unknown_flag_exits_one() {
    let out = mdb(&["--no-such-flag"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let out = mdb(&["--help"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("--low-space"));
}

#[test]
fn test_no_scanning_drives_exits_zero() {
    let f = healthy_cluster();
    let out = mdb(&[path_arg(f.path()), "--scanning"]);
    assert_eq!(out.status.code(), Some(0));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.ends_with("No scanning disks found in the provided data.\n"));
}

#[test]
fn test_default_report_exits_zero() {
    let f = healthy_cluster();
    let out = mdb(&[path_arg(f.path())]);
    assert_eq!(out.status.code(), Some(0));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.starts_with("Detected Erasure Coding Configuration: EC:2\n"));
    assert!(text.contains("Total Disks: 2\n"));
}
