//! Script compiler module.
//! Compiles callback scripts into an intermediate representation (AST) and
//! stores them in a local cache keyed by content hash.

use std::sync::Arc;

use dashmap::DashMap;
use rhai::{AST, Engine};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::EngineConfig;

/// A type alias for the hash of a script.
type ScriptHash = [u8; 32];

/// The script compiler. It caches compiled ASTs so repeated requests for the
/// same script content compile only once.
#[derive(Debug)]
pub struct ScriptCompiler {
    /// The engine used for compiling and executing scripts.
    pub engine: Arc<Engine>,
    /// A cache that stores the compiled ASTs of scripts.
    cache: DashMap<ScriptHash, Arc<AST>>,
}

/// Errors that can occur during script compilation.
#[derive(Debug, Clone, Error)]
pub enum ScriptCompilerError {
    /// Error that occurs during script compilation.
    #[error("script compilation error: {0}")]
    CompilationError(#[from] rhai::ParseError),
}

/// Creates an engine with the configured resource limits applied.
///
/// A limit of zero disables that limit, matching the engine's own convention.
fn create_engine(config: &EngineConfig) -> Engine {
    let mut engine = Engine::new();

    engine.set_max_operations(config.max_operations);
    engine.set_max_call_levels(config.max_call_levels);
    engine.set_max_string_size(config.max_string_size);
    engine.set_max_array_size(config.max_array_size);

    engine
}

impl ScriptCompiler {
    /// Creates a new instance of the script compiler.
    pub fn new(config: EngineConfig) -> Self {
        let engine = create_engine(&config);

        ScriptCompiler { engine: Arc::new(engine), cache: DashMap::new() }
    }

    /// Computes the cache key for a script's source text.
    fn hash_script(script: &str) -> ScriptHash {
        Sha256::digest(script.as_bytes()).into()
    }

    /// Compiles a script into an AST. If the same content has been compiled
    /// before, the cached AST is returned instead.
    pub fn compile(&self, script: &str) -> Result<Arc<AST>, ScriptCompilerError> {
        let key = Self::hash_script(script);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.value().clone());
        }

        let ast = Arc::new(self.engine.compile(script)?);
        self.cache.insert(key, ast.clone());

        Ok(ast)
    }
}
