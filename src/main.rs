use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blobmint::blockchain::{ChainClient, ChainRpc};
use blobmint::config::{self, ServiceConfig};
use blobmint::observability::RequestLogger;
use blobmint::{HttpServer, Minter};

/// Blob-carrying mint transaction service.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the web content root.
    #[arg(long)]
    web: Option<String>,

    /// Override the L1 JSON-RPC endpoint.
    #[arg(long)]
    rpc_url: Option<String>,

    /// Dev mode: plain HTTP on the bind address, no TLS, no redirect.
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blobmint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(web) = cli.web {
        config.web.web_root = web;
    }
    if let Some(rpc_url) = cli.rpc_url {
        config.chain.rpc_url = rpc_url;
    }
    if cli.dev {
        config.listener.dev = true;
        if cli.config.is_none() {
            config.listener.bind_address = "127.0.0.1:8443".to_string();
        }
    }
    config::validate(&config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.chain.rpc_url,
        mint_contract = %config.chain.mint_contract,
        web_root = %config.web.web_root,
        dev = config.listener.dev,
        "Configuration loaded"
    );

    let logger = match &config.logging.access_log_path {
        Some(path) => RequestLogger::to_file(path).await?,
        None => RequestLogger::stdout(),
    };

    let client = ChainClient::connect(&config.chain)?;
    // One round trip up front so misconfiguration fails at startup, and the
    // pipeline never re-fetches the chain ID per request.
    let chain_id = client.get_chain_id().await?;
    tracing::info!(chain_id, "Connected to chain");

    let minter = Arc::new(Minter::new(
        Arc::new(client),
        config.chain.mint_contract,
        chain_id,
    ));

    let server = HttpServer::new(config, minter, logger);
    server.run().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
