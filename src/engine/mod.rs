//! The script engine compiles callback scripts, executes named callbacks and
//! converts values between JSON and script types.

pub mod compiler;
pub mod conversions;
pub mod executor;

pub use compiler::{ScriptCompiler, ScriptCompilerError};
pub use executor::{ScriptExecutor, ScriptExecutorError};
