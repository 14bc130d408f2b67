use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use clothing_api::config::{AppConfig, StorageBackend};
use clothing_api::{app, AppState};

#[derive(Debug, Parser)]
#[command(name = "clothing-api", version, about = "Clothing inventory REST API")]
struct Args {
    /// Interface to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides CLOTHING_API_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep inventory in process memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,
}

impl Args {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.in_memory {
            config.server.storage = StorageBackend::Memory;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let mut config = AppConfig::from_env();
    Args::parse().apply(&mut config);

    tracing::info!("Starting clothing API in {:?} mode", config.environment);
    if config.security.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every /api/v1 request will be rejected");
    }

    let bind_addr = config.bind_addr();
    let (state, database) = AppState::connect(config).await;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Server is running on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(database) = database {
        database.close().await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
