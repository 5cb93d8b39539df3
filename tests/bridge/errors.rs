use serde_json::json;

use crate::helpers::*;

#[tokio::test]
async fn malformed_json_body_is_invalid_payload() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke_raw("{not json").await;
    assert_bridge_error(resp, "invalid payload").await;

    server.cleanup();
}

#[tokio::test]
async fn empty_body_is_invalid_payload() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke_raw("").await;
    assert_bridge_error(resp, "invalid payload").await;

    server.cleanup();
}

#[tokio::test]
async fn non_object_body_is_invalid_payload() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    for body in ["[1, 2, 3]", "\"text\"", "42", "null"] {
        let resp = server.invoke_raw(body).await;
        assert_bridge_error(resp, "invalid payload").await;
    }

    server.cleanup();
}

#[tokio::test]
async fn missing_script_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({})).await;
    assert_bridge_error(resp, "obj script not found").await;

    server.cleanup();
}

#[tokio::test]
async fn nonexistent_script_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "missing.rhai" })).await;
    assert_bridge_error(resp, "obj script not found").await;

    server.cleanup();
}

#[tokio::test]
async fn non_string_script_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": 42 })).await;
    assert_bridge_error(resp, "obj script not found").await;

    server.cleanup();
}

#[tokio::test]
async fn directory_script_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("subdir")).unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "subdir" })).await;
    assert_bridge_error(resp, "obj script not found").await;

    server.cleanup();
}

#[tokio::test]
async fn syntax_error_script_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "broken.rhai", "fn main(params { 1 }");
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "broken.rhai" })).await;
    assert_bridge_error(resp, "script load failed").await;

    server.cleanup();
}

#[tokio::test]
async fn top_level_throw_is_load_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_script(
        dir.path(),
        "faulty.rhai",
        r#"
        throw "broken at load";

        fn main(params) { 1 }
        "#,
    );
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "faulty.rhai" })).await;
    assert_bridge_error(resp, "script load failed").await;

    server.cleanup();
}

#[tokio::test]
async fn unknown_callback_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "script.rhai", SAMPLE_SCRIPT);
    let server = TestServer::new(dir.path()).await;

    let resp = server
        .invoke(&json!({ "script_file": "script.rhai", "callback": "nope" }))
        .await;
    assert_bridge_error(resp, "callback not found").await;

    server.cleanup();
}

#[tokio::test]
async fn private_callback_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "hidden.rhai", "private fn hidden(params) { 1 }");
    let server = TestServer::new(dir.path()).await;

    let resp = server
        .invoke(&json!({ "script_file": "hidden.rhai", "callback": "hidden" }))
        .await;
    assert_bridge_error(resp, "callback not found").await;

    server.cleanup();
}

#[tokio::test]
async fn non_string_callback_is_not_found_after_load() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "script.rhai", SAMPLE_SCRIPT);
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "script.rhai", "callback": 42 })).await;
    assert_bridge_error(resp, "callback not found").await;

    server.cleanup();
}

#[tokio::test]
async fn missing_script_takes_precedence_over_bad_callback() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "callback": 42 })).await;
    assert_bridge_error(resp, "obj script not found").await;

    server.cleanup();
}

#[tokio::test]
async fn throwing_callback_is_execution_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "thrower.rhai", r#"fn main(params) { throw "boom"; }"#);
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "thrower.rhai" })).await;
    assert_bridge_error(resp, "callback execution failed").await;

    server.cleanup();
}

#[tokio::test]
async fn undefined_call_inside_callback_is_execution_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "caller.rhai", "fn main(params) { no_such_function() }");
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "caller.rhai" })).await;
    assert_bridge_error(resp, "callback execution failed").await;

    server.cleanup();
}

#[tokio::test]
async fn non_finite_return_is_invalid_response() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "nan.rhai", "fn main(params) { 0.0 / 0.0 }");
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "nan.rhai" })).await;
    assert_bridge_error(resp, "invalid callback response").await;

    server.cleanup();
}

#[tokio::test]
async fn non_serializable_return_is_invalid_response() {
    let dir = tempfile::tempdir().unwrap();
    write_script(dir.path(), "clock.rhai", "fn main(params) { timestamp() }");
    let server = TestServer::new(dir.path()).await;

    let resp = server.invoke(&json!({ "script_file": "clock.rhai" })).await;
    assert_bridge_error(resp, "invalid callback response").await;

    server.cleanup();
}
