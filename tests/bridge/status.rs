use serde_json::{Value, json};

use crate::helpers::*;

#[tokio::test]
async fn status_endpoint_reports_version_and_counters() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "script.rhai", SAMPLE_SCRIPT);
    let server = TestServer::new(dir.path()).await;

    let resp = server.get("/status").await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["invocations"], 0);
    assert_eq!(body["failures"], 0);

    // One success and one failure must both be counted.
    server.invoke(&json!({ "script_file": "script.rhai" })).await;
    server.invoke(&json!({ "script_file": "missing.rhai" })).await;

    let resp = server.get("/status").await;
    let body: Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body["invocations"], 2);
    assert_eq!(body["failures"], 1);
    assert!(body["uptime_secs"].is_u64());

    server.cleanup();
}
