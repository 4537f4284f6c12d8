//! Reference users REST API server.
//!
//! Serves `/api/users` and `/actuator/health` from memory until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use user_api_stub::{Router, Server, StubConfig, UserStore};

/// Command-line arguments for the reference server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Status reported by the health endpoint
    #[arg(long, default_value = "UP")]
    health_status: String,

    /// Answer DELETE with 200 and the removed user instead of 204
    #[arg(long)]
    delete_returns_entity: bool,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Store created users without their address
    #[arg(long)]
    drop_address: bool,

    /// Answer PUT with the unchanged user
    #[arg(long)]
    ignore_updates: bool,

    /// Answer DELETE without removing the user
    #[arg(long)]
    ignore_deletes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    let config = Arc::new(StubConfig {
        health_status: args.health_status.clone(),
        delete_returns_entity: args.delete_returns_entity,
        request_timeout_ms: args.request_timeout_ms,
        drop_address: args.drop_address,
        ignore_updates: args.ignore_updates,
        ignore_deletes: args.ignore_deletes,
    });

    let router = Router::new(Arc::new(UserStore::new()), config);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let server = Server::bind(addr, router).await?;

    println!("Starting reference users API server...");
    println!("  Address: http://{}", server.local_addr()?);
    println!("  Health status: {}", args.health_status);
    println!(
        "  Delete response: {}",
        if args.delete_returns_entity {
            "200 with entity"
        } else {
            "204 No Content"
        }
    );
    println!("  Request timeout: {} ms", args.request_timeout_ms);
    if args.drop_address || args.ignore_updates || args.ignore_deletes {
        println!(
            "  Faults: drop_address={} ignore_updates={} ignore_deletes={}",
            args.drop_address, args.ignore_updates, args.ignore_deletes
        );
    }

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.serve().await {
            tracing::error!("Server error: {}", e);
        }
    });

    // Wait for Ctrl+C
    signal::ctrl_c().await?;
    println!("\nShutting down server...");
    server_handle.abort();

    Ok(())
}
