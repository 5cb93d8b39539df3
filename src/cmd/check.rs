//! The `check` subcommand: compiles a script and lists the callbacks it
//! exposes, without starting the server.

use clap::Parser;
use thiserror::Error;

use crate::{
    config::EngineConfig,
    engine::{ScriptCompiler, ScriptCompilerError, executor::exported_callbacks},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Compilation error: {0}")]
    Compile(#[from] ScriptCompilerError),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the script file to check.
    #[arg(short, long)]
    script: String,
}

/// Compiles the script and prints its public callbacks, one per line.
pub fn execute(args: CheckArgs) -> Result<(), Error> {
    let source = std::fs::read_to_string(&args.script)?;

    let compiler = ScriptCompiler::new(EngineConfig::default());
    let ast = compiler.compile(&source)?;

    let callbacks = exported_callbacks(&ast);
    if callbacks.is_empty() {
        println!("{}: no public callbacks", args.script);
    } else {
        println!("{}:", args.script);
        for callback in callbacks {
            println!("  {}", callback);
        }
    }

    Ok(())
}
