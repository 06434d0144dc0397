//! Zephyr Scale MCP Server
//!
//! Bridges the Zephyr Scale Cloud REST API to the Model Context Protocol.

mod auth;
mod client;
mod config;
mod debug;
mod endpoints;
mod error;
mod params;
mod payload;
mod server;
mod shaping;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::ZephyrClient;
use crate::config::Config;
use crate::debug::DebugLogger;
use crate::server::ZephyrScaleServer;

#[derive(Parser, Debug)]
#[command(name = "zephyr-scale-mcp")]
#[command(author, version, about = "Zephyr Scale MCP Server", long_about = None)]
struct Args {
    /// Enable debug mode (trace file of all tool calls, debug logging)
    #[arg(short, long)]
    debug: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(args: &Args) {
    let fallback = if args.debug { "debug" } else { args.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // stdout carries the MCP protocol
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_logging(&args);

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.debug = args.debug;
    let config = Arc::new(config);

    let debug = Arc::new(DebugLogger::new(config.debug));

    tracing::info!("Starting Zephyr Scale MCP Server");
    tracing::info!("API Base: {}", config.api_base_url());
    tracing::info!("Region: {}", config.region.label());
    if let Some(path) = debug.trace_path() {
        tracing::info!("Trace file: {}", path.display());
    }

    let client = ZephyrClient::new(config.clone())?;
    let server = ZephyrScaleServer::new(client, debug.clone());

    debug.log("Starting MCP server on stdio transport...");
    let service = server.serve(stdio()).await?;

    service.waiting().await?;
    debug.log("MCP server shutting down");

    Ok(())
}
