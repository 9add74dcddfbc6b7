//! Generator integration tests
//!
//! Tests for generating from schema files on disk, including read failures,
//! determinism and validity of the output.

use spdk_rpc_gen::{generate, SchemaError, HEADER};
use std::fs;
use std::path::PathBuf;

fn write_schema(dir: &tempfile::TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("rpc.json");
    fs::write(&path, text).unwrap();
    path
}

fn bundled_schema() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../spdk-rpc-methods/schema/rpc_methods.json")
}

#[test]
fn test_generate_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_schema(
        &dir,
        r#"{"methods": [{
            "method": "bdev_get_bdevs",
            "description": "Get information about block devices",
            "params": [
                {"param": "name", "type": "string", "description": "Block device name", "required": false},
                {"param": "timeout", "type": "number", "description": "Time in ms to wait", "required": false}
            ]
        }]}"#,
    );

    let output = generate(&path).unwrap();
    assert!(output.starts_with(HEADER));
    assert!(output.contains("pub struct BdevGetBdevs"));
    assert!(output.contains("pub Name: ::std::option::Option<::std::string::String>,"));
    assert!(output.contains("pub Timeout: ::std::option::Option<i64>,"));
}

#[test]
fn test_missing_file_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");

    match generate(&path) {
        Err(SchemaError::Unreadable { path: reported, source }) => {
            assert_eq!(reported, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("Expected unreadable schema, got {:?}", other),
    }
}

#[test]
fn test_invalid_json_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_schema(&dir, r#"{"methods": [{"method": "a""#);

    assert!(matches!(generate(&path), Err(SchemaError::Malformed(_))));
}

#[test]
fn test_non_utf8_file_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rpc.json");
    fs::write(&path, b"{\"methods\": [{\"method\": \"bdev_\xff\"}]}").unwrap();

    assert!(matches!(generate(&path), Err(SchemaError::Malformed(_))));
}

#[test]
fn test_bundled_schema_generates_valid_rust() {
    let output = generate(bundled_schema()).unwrap();

    let body = output.strip_prefix(HEADER).unwrap();
    let file = syn::parse_file(body).unwrap();

    // a struct and an impl per method
    assert_eq!(file.items.len(), 24);
}

#[test]
fn test_same_input_same_output() {
    let first = generate(bundled_schema()).unwrap();
    let second = generate(bundled_schema()).unwrap();
    assert_eq!(first, second);
}
