//! Configuration module for the bridge.

mod app_config;
mod engine;
mod server;

pub use app_config::AppConfig;
pub use engine::EngineConfig;
pub use server::ServerConfig;
