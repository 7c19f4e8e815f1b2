//! Storecast Server
//!
//! HTTP backend for the Storecast internal messaging tool: store
//! directory, message persistence, and session auth.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use storecast_core::tracing_init::init_tracing;
use storecast_server::routes::{AppState, build_router};
use storecast_server::seed;
use storecast_server::storage::StorecastDatabase;

#[derive(Parser, Debug)]
#[command(name = "storecast-server")]
#[command(version, about = "Storecast server - store directory and message API")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080", env = "STORECAST_ADDR")]
    addr: SocketAddr,

    /// Path to SQLite database file.
    #[arg(long, env = "STORECAST_DB")]
    db_path: Option<PathBuf>,

    /// Session TTL in seconds.
    #[arg(long, default_value_t = 604_800, env = "STORECAST_SESSION_TTL")]
    session_ttl: i64,

    /// JSON file with users and stores to provision at startup.
    #[arg(long, env = "STORECAST_SEED")]
    seed: Option<PathBuf>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing("storecast_server=info", args.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %args.addr,
        "Starting storecast-server"
    );

    let db = match &args.db_path {
        Some(path) => StorecastDatabase::open(path).await?,
        None => {
            let default_path = default_db_path()?;
            info!(path = %default_path.display(), "Opening database (default path)");
            StorecastDatabase::open(&default_path).await?
        }
    };

    if let Some(path) = &args.seed {
        seed::apply_seed_file(&db, path).await?;
    }

    let app = build_router(AppState {
        db,
        session_ttl: args.session_ttl,
    });

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!(addr = %args.addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Received shutdown signal");
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".storecast").join("storecast.db"))
}
