use serde::Deserialize;

/// Configuration for script execution including resource limits.
///
/// Scripts are trusted test fixtures, so the limits default to generous
/// values; they exist to stop a runaway script, not to sandbox hostile code.
/// A value of zero disables the corresponding limit.
#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Maximum number of operations a script can perform.
    #[serde(default = "default_max_operations")]
    pub max_operations: u64,

    /// Maximum function call nesting depth.
    #[serde(default = "default_max_call_levels")]
    pub max_call_levels: usize,

    /// Maximum size of strings in characters.
    #[serde(default = "default_max_string_size")]
    pub max_string_size: usize,

    /// Maximum number of array elements.
    #[serde(default = "default_max_array_size")]
    pub max_array_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_operations: default_max_operations(),
            max_call_levels: default_max_call_levels(),
            max_string_size: default_max_string_size(),
            max_array_size: default_max_array_size(),
        }
    }
}

/// Default limit values
fn default_max_operations() -> u64 {
    1_000_000
}

fn default_max_call_levels() -> usize {
    64
}

fn default_max_string_size() -> usize {
    0
}

fn default_max_array_size() -> usize {
    0
}
