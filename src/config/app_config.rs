use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{EngineConfig, ServerConfig};

/// Provides the default value for scripts_dir.
fn default_scripts_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Application configuration for the bridge.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Directory that relative `script_file` paths are resolved against.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: PathBuf,

    /// Script engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scripts_dir: default_scripts_dir(),
            engine: EngineConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("OBJ_BRIDGE").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Resolves a requested script path against `scripts_dir`.
    ///
    /// Absolute paths are used as-is; relative paths are joined onto the
    /// configured directory. Returns `None` unless the result names an
    /// existing regular file.
    pub fn resolve_script_path(&self, script_file: &str) -> Option<PathBuf> {
        if script_file.is_empty() {
            return None;
        }
        let requested = Path::new(script_file);
        let resolved = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.scripts_dir.join(requested)
        };
        resolved.is_file().then_some(resolved)
    }
}
