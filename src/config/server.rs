use serde::Deserialize;

/// Configuration for the bridge HTTP server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen_address: default_listen_address() }
    }
}

/// Provides the default value for listen_address.
fn default_listen_address() -> String {
    "127.0.0.1:8080".to_string()
}
