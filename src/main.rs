use std::net::SocketAddr;

use arxiv_relay::{config::Config, routes::create_router, utils::init_logger, AppState};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

/// Relay simple keyword searches to the arXiv API
#[derive(Debug, Parser)]
#[command(name = "arxiv-relay", version, about)]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    info!("Configuration loaded: {:?}", config);

    let state = AppState::new(config.clone())?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
