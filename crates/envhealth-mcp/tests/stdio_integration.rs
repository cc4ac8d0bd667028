//! Integration tests for the envhealth-mcp binary.
//!
//! These spawn the real server process and exercise it over its stdio
//! framing, the same way the teacher's `deps-lsp` binary is exercised in
//! `lsp_integration.rs`, scaled down to this server's four operations.

mod common;

use common::EngineClient;
use serde_json::json;
use std::fs;

#[test]
fn test_unknown_method_is_error() {
    let mut client = EngineClient::spawn();
    let response = client.call(1, "delete_everything", json!({}));
    assert!(response.get("error").is_some());
    assert_eq!(response["id"], json!(1));
}

#[test]
fn test_missing_project_root_is_error() {
    let mut client = EngineClient::spawn();
    let response = client.call(2, "env_var_audit", json!({}));
    assert!(response.get("error").is_some());
}

#[test]
fn test_env_var_audit_on_node_fixture() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::write(
        dir.path().join("index.js"),
        "const key = process.env.MISSING_API_KEY;\n",
    )
    .unwrap();

    let mut client = EngineClient::spawn();
    let response = client.call(
        3,
        "env_var_audit",
        json!({ "project_root": dir.path().to_str().unwrap() }),
    );

    assert!(response.get("error").is_none(), "unexpected error: {response:?}");
    let result = &response["result"];
    assert_eq!(result["missing"], json!(["MISSING_API_KEY"]));
}

#[test]
fn test_verify_build_freshness_on_empty_project_has_no_ecosystem() {
    let dir = tempfile::tempdir().unwrap();

    let mut client = EngineClient::spawn();
    let response = client.call(
        4,
        "verify_build_freshness",
        json!({ "project_root": dir.path().to_str().unwrap() }),
    );

    assert!(response.get("error").is_none());
    assert_eq!(response["result"], json!("No ecosystems detected in project"));
}

#[test]
fn test_verify_build_freshness_on_maven_project() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("pom.xml"), "<project/>").unwrap();

    let mut client = EngineClient::spawn();
    let response = client.call(
        5,
        "verify_build_freshness",
        json!({ "project_root": dir.path().to_str().unwrap() }),
    );

    assert!(response.get("error").is_none(), "unexpected error: {response:?}");
    assert_eq!(response["result"]["ecosystem_id"], json!("java-maven"));
}

#[test]
fn test_project_root_not_found_is_error() {
    let mut client = EngineClient::spawn();
    let response = client.call(
        6,
        "verify_build_freshness",
        json!({ "project_root": "/does/not/exist/anywhere/at/all" }),
    );
    assert!(response.get("error").is_some());
}

#[test]
fn test_multiple_requests_on_one_connection() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();

    let mut client = EngineClient::spawn();
    let first = client.call(
        10,
        "env_var_audit",
        json!({ "project_root": dir.path().to_str().unwrap() }),
    );
    let second = client.call(
        11,
        "check_infrastructure_parity",
        json!({ "project_root": dir.path().to_str().unwrap() }),
    );

    assert_eq!(first["id"], json!(10));
    assert_eq!(second["id"], json!(11));
}
