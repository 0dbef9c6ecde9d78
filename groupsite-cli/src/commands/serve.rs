//! HTTP server command
//!
//! Connects the PostgreSQL gateway (or an empty in-memory one) and serves
//! the contacts, group description and reviews routes.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use groupsite_server::db::DEFAULT_MAX_CONNECTIONS;
use groupsite_server::http::{run_server, ServerConfig};
use groupsite_server::{MemoryGateway, PgGateway, QueryGateway};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3030", env = "GROUPSITE_BIND")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "GROUPSITE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Serve from an empty in-memory store instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,
}

async fn connect(args: &ServeArgs) -> Result<Arc<dyn QueryGateway>> {
    if args.in_memory {
        tracing::warn!("Using in-memory store - data is lost on shutdown");
        return Ok(Arc::new(MemoryGateway::new()));
    }

    let database_url = args
        .database_url
        .as_deref()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let gateway = PgGateway::connect(database_url, args.max_connections)
        .await
        .context("Failed to connect to PostgreSQL")?;
    tracing::info!(max_connections = args.max_connections, "Database pool ready");

    Ok(Arc::new(gateway))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting groupsite server on {}", args.bind);

    let gateway = connect(&args).await?;
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Blocks until shutdown
    run_server(gateway, config).await.context("Server error")?;

    Ok(())
}
