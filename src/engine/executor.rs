//! Loads callback scripts and invokes named functions from them.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use rhai::{AST, CallFnOptions, Dynamic, EvalAltResult, FnAccess, Scope};
use serde_json::Value;
use thiserror::Error;

use super::{
    compiler::{ScriptCompiler, ScriptCompilerError},
    conversions::{ConversionError, dynamic_to_json, json_to_dynamic},
};
use crate::models::CallbackContext;

/// An error that occurs while loading a script or invoking a callback.
#[derive(Debug, Error)]
pub enum ScriptExecutorError {
    /// The script file could not be read.
    #[error("failed to read script '{path}': {source}")]
    ReadScript {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The script failed to compile.
    #[error("script compilation failed: {0}")]
    Compile(#[from] ScriptCompilerError),

    /// Evaluating the script's top-level statements raised an error.
    #[error("script evaluation failed: {0}")]
    Load(Box<EvalAltResult>),

    /// No public function in the script matches the callback name.
    #[error("callback '{0}' not found in script")]
    CallbackNotFound(String),

    /// The callback raised an error during invocation.
    #[error("callback '{name}' failed: {source}")]
    CallbackFailed {
        /// The callback that was invoked.
        name: String,
        /// The underlying evaluation error.
        source: Box<EvalAltResult>,
    },

    /// The callback's return value has no JSON representation.
    #[error("invalid callback return value: {0}")]
    InvalidReturn(#[from] ConversionError),

    /// The blocking execution task failed.
    #[error("script execution task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Picks the invocation arity for the named callback among the public
/// functions the script defines. The two-argument form `(params, context)`
/// takes precedence, then `(params)`, then no arguments. Any other arity is
/// returned as-is and fails at call time with an argument mismatch.
fn resolve_arity(ast: &AST, name: &str) -> Option<usize> {
    let arities: Vec<usize> = ast
        .iter_functions()
        .filter(|f| f.access == FnAccess::Public && f.name == name)
        .map(|f| f.params.len())
        .collect();

    for preferred in [2, 1, 0] {
        if arities.contains(&preferred) {
            return Some(preferred);
        }
    }
    arities.into_iter().min()
}

/// Lists the public functions a compiled script exposes, formatted as
/// `name(param, ...)`.
pub fn exported_callbacks(ast: &AST) -> Vec<String> {
    ast.iter_functions()
        .filter(|f| f.access == FnAccess::Public)
        .map(|f| format!("{}({})", f.name, f.params.join(", ")))
        .collect()
}

/// Executes callbacks from scripts on disk.
///
/// Each invocation reads the script, compiles it (through the content-hash
/// cache), evaluates its top-level statements in a fresh scope, resolves the
/// callback among its public functions and invokes it. Function definitions
/// live in the request's AST rather than any global registry, so loading the
/// same script any number of times is idempotent.
#[derive(Debug)]
pub struct ScriptExecutor {
    compiler: Arc<ScriptCompiler>,
}

impl ScriptExecutor {
    /// Creates a new executor backed by the given compiler.
    pub fn new(compiler: Arc<ScriptCompiler>) -> Self {
        Self { compiler }
    }

    /// Loads the script at `script_path` and invokes `callback` with the
    /// request parameters, returning the callback's value as JSON.
    ///
    /// The callback receives arguments according to the arity it declares:
    /// `(params, context)`, `(params)` or `()`.
    #[tracing::instrument(skip(self, params, context))]
    pub async fn run_callback(
        &self,
        script_path: &Path,
        callback: &str,
        params: Value,
        context: CallbackContext,
    ) -> Result<Value, ScriptExecutorError> {
        let compiler = Arc::clone(&self.compiler);
        let path = script_path.to_path_buf();
        let name = callback.to_string();

        // Engine work is synchronous; run the whole load/invoke pipeline on
        // the blocking thread pool.
        tokio::task::spawn_blocking(move || -> Result<Value, ScriptExecutorError> {
            let source = std::fs::read_to_string(&path)
                .map_err(|source| ScriptExecutorError::ReadScript { path: path.clone(), source })?;
            let ast = compiler.compile(&source)?;

            // Top-level statements run in a fresh scope per invocation.
            let mut scope = Scope::new();
            compiler
                .engine
                .eval_ast_with_scope::<Dynamic>(&mut scope, &ast)
                .map_err(ScriptExecutorError::Load)?;

            // Resolution happens before invocation so that a missing callback
            // and a callback whose body faults stay distinguishable.
            let arity = resolve_arity(&ast, &name)
                .ok_or_else(|| ScriptExecutorError::CallbackNotFound(name.clone()))?;

            let params_arg = json_to_dynamic(&params);
            let args: Vec<Dynamic> = match arity {
                0 => vec![],
                1 => vec![params_arg],
                _ => vec![params_arg, context.into_dynamic()],
            };

            let options = CallFnOptions::new().eval_ast(false);
            let result = compiler
                .engine
                .call_fn_with_options::<Dynamic>(options, &mut scope, &ast, &name, args)
                .map_err(|source| ScriptExecutorError::CallbackFailed {
                    name: name.clone(),
                    source,
                })?;

            Ok(dynamic_to_json(&result)?)
        })
        .await?
    }
}
