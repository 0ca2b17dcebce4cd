use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bmad_board::config::BoardConfig;
use bmad_board::server::{ServerConfig, start_server};

#[derive(Parser)]
#[command(name = "bmad-board")]
#[command(version, about = "Serve the BMAD local live board")]
pub struct Cli {
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, default_value_t = 4173)]
    pub port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let workspace_root = std::env::current_dir().context("Failed to get current directory")?;

    start_server(ServerConfig {
        host: cli.host,
        port: cli.port,
        board: BoardConfig::from_workspace(workspace_root),
    })
    .await
}
