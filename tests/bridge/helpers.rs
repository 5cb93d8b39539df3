use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use obj_bridge::{
    config::{AppConfig, ServerConfig},
    engine::{ScriptCompiler, ScriptExecutor},
    http_server,
    metrics::AppMetrics,
};
use reqwest::Client;
use tokio::task;

/// The sample fixture shipped with the repository.
pub const SAMPLE_SCRIPT: &str = include_str!("../../fixtures/script.rhai");

pub fn write_script(dir: &Path, name: &str, source: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).expect("Failed to write script");
    path
}

pub struct TestServer {
    pub address: SocketAddr,
    pub server_handle: task::JoinHandle<()>,
    pub client: Client,
}

impl TestServer {
    pub async fn new(scripts_dir: &Path) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get address");
        drop(listener); // Release port for the app to use

        let config = Arc::new(AppConfig {
            scripts_dir: scripts_dir.to_path_buf(),
            server: ServerConfig { listen_address: addr.to_string() },
            ..Default::default()
        });

        let compiler = Arc::new(ScriptCompiler::new(config.engine.clone()));
        let executor = Arc::new(ScriptExecutor::new(compiler));
        let metrics = AppMetrics::default();

        // Spawn the actual app server
        let server_handle = task::spawn(async move {
            http_server::run_server_from_config(config, executor, metrics).await;
        });

        // Wait for server to start
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;

        Self { address: addr, server_handle, client: Client::new() }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        let url = format!("http://{}{}", self.address, path);
        self.client.get(&url).send().await.expect("Request failed")
    }

    /// Posts a JSON payload to the invocation endpoint.
    pub async fn invoke(&self, payload: &serde_json::Value) -> reqwest::Response {
        let url = format!("http://{}/", self.address);
        self.client.post(&url).json(payload).send().await.expect("Request failed")
    }

    /// Posts a raw body, with no content type, to the invocation endpoint.
    pub async fn invoke_raw(&self, body: &'static str) -> reqwest::Response {
        let url = format!("http://{}/", self.address);
        self.client.post(&url).body(body).send().await.expect("Request failed")
    }

    pub fn cleanup(self) {
        self.server_handle.abort();
    }
}

/// Asserts that a response follows the bridge error protocol: HTTP 200, a
/// JSON content type, and the expected kind under the error key.
pub async fn assert_bridge_error(resp: reqwest::Response, kind: &str) {
    assert_eq!(resp.status(), 200);

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content type: {content_type}"
    );

    let body: serde_json::Value = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body[http_server::BRIDGE_ERROR_KEY], kind);
}
