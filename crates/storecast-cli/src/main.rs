//! Storecast CLI
//!
//! Terminal client for the storecast server: log in, browse the store
//! directory, review messages, and compose new ones.

use std::io;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storecast_cli::auth_cmd;
use storecast_cli::client::{ClientConfig, HttpBackend};
use storecast_cli::config::CliConfig;
use storecast_cli::message_cmd;
use storecast_cli::store_cmd;
use storecast_core::{Session, TargetingSelection};

#[derive(Parser, Debug)]
#[command(name = "storecast")]
#[command(version, about = "Compose and review store-targeted messages", long_about = None)]
struct Cli {
    /// Server URL (overrides the configured one).
    #[arg(long, env = "STORECAST_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in to a storecast server.
    Login {
        /// Account email (prompted when omitted).
        #[arg(short, long)]
        email: Option<String>,
        /// Account password (prompted when omitted).
        #[arg(short, long, env = "STORECAST_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log out and revoke the stored session.
    Logout,
    /// Show current login status.
    Status,
    /// List the store directory.
    Stores,
    /// List messages, newest first.
    Messages,
    /// Show a single message in full.
    View {
        /// Message id, full or the prefix shown in listings.
        id: String,
    },
    /// Compose and send a message.
    Send {
        /// Message title (prompted when omitted).
        #[arg(short, long)]
        title: Option<String>,
        /// Message body (prompted when omitted).
        #[arg(short, long)]
        body: Option<String>,
        /// Target stores by free-typed comma-separated codes.
        #[arg(long, group = "target")]
        codes: Option<String>,
        /// Target stores by directory ids, comma-separated.
        #[arg(long, group = "target", value_delimiter = ',')]
        store_ids: Option<Vec<String>>,
        /// Broadcast to every store in the directory.
        #[arg(long, group = "target")]
        all: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "storecast=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting storecast CLI");

    let mut config = CliConfig::load();
    if let Some(server) = cli.server {
        config.server_url = Some(server);
    }

    match cli.command {
        Commands::Login { email, password } => auth_cmd::login(&mut config, email, password).await,
        Commands::Logout => auth_cmd::logout(&mut config).await,
        Commands::Status => {
            auth_cmd::status(&config);
            Ok(())
        }
        Commands::Stores => {
            let (backend, _) = authed_backend(&config)?;
            store_cmd::list(&backend).await
        }
        Commands::Messages => {
            let (backend, _) = authed_backend(&config)?;
            message_cmd::list(&backend).await
        }
        Commands::View { id } => {
            let (backend, _) = authed_backend(&config)?;
            message_cmd::view(&backend, &id).await
        }
        Commands::Send {
            title,
            body,
            codes,
            store_ids,
            all,
        } => {
            let (backend, session) = authed_backend(&config)?;
            let targeting = targeting_from_flags(codes, store_ids, all);
            message_cmd::send(backend, &session, title, body, targeting).await
        }
    }
}

/// Build an authenticated client from the stored session.
fn authed_backend(config: &CliConfig) -> anyhow::Result<(HttpBackend, Session)> {
    let session = config
        .session
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `storecast login` first."))?;
    let backend = HttpBackend::new(&ClientConfig {
        base_url: config.effective_server_url().to_string(),
        token: Some(session.token.clone()),
    })?;
    Ok((backend, session.as_session()))
}

/// Map the targeting flags onto a selection. No flag means no mode was
/// chosen, which the submission workflow rejects with its own message.
fn targeting_from_flags(
    codes: Option<String>,
    store_ids: Option<Vec<String>>,
    all: bool,
) -> Option<TargetingSelection> {
    if all {
        Some(TargetingSelection::All)
    } else if let Some(codes) = codes {
        Some(TargetingSelection::Manual { codes })
    } else {
        store_ids.map(|store_ids| TargetingSelection::Select { store_ids })
    }
}
