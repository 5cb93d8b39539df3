use std::sync::Arc;

use clap::{Parser, Subcommand};
use obj_bridge::{
    cmd::{CheckArgs, check},
    config::AppConfig,
    engine::{ScriptCompiler, ScriptExecutor},
    http_server,
    metrics::AppMetrics,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration directory. Defaults to `configs`.
    #[arg(short, long)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the bridge HTTP server.
    Run,
    /// Compiles a script and lists the callbacks it exposes.
    Check(CheckArgs),
}

#[tokio::main]
#[tracing::instrument(level = "info")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_server(cli.config_dir.as_deref()).await?,
        Commands::Check(args) => check::execute(args)?,
    }

    Ok(())
}

async fn run_server(config_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = Arc::new(AppConfig::new(config_dir)?);
    tracing::debug!(
        listen_address = %config.server.listen_address,
        scripts_dir = %config.scripts_dir.display(),
        "Configuration loaded."
    );

    let compiler = Arc::new(ScriptCompiler::new(config.engine.clone()));
    let executor = Arc::new(ScriptExecutor::new(compiler));
    let metrics = AppMetrics::default();

    http_server::run_server_from_config(config, executor, metrics).await;

    Ok(())
}
