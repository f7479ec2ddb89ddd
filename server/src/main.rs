//! Train ticket server.
//!
//! Loads `.env`, initializes tracing and the metrics exporter, builds the
//! ledger from configuration and serves the HTTP API until Ctrl+C or SIGTERM.
//!
//! # Usage
//!
//! ```bash
//! PORT=50051 TRAIN_SECTIONS=A,B SEATS_PER_SECTION=10 cargo run --bin train-ticket-server
//! ```

use anyhow::Context;
use train_ticket_core::Ledger;
use train_ticket_server::{Config, metrics, serve, shutdown_signal};
use train_ticket_web::{AppState, build_router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},train_ticket=debug", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting train ticket server...");

    let ledger_config = config
        .ledger_config()
        .context("invalid train configuration")?;
    tracing::info!(
        sections = ?config.train.sections,
        seats_per_section = config.train.seats_per_section,
        ticket_price = config.train.ticket_price,
        "Configuration loaded"
    );

    let ledger = Ledger::new(&ledger_config);

    if config.metrics.enabled {
        metrics::install_exporter(config.metrics_addr()?)?;
        ledger.publish_occupancy().await;
    }

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    serve(
        listener,
        build_router(AppState::new(ledger)),
        shutdown_signal(),
        config.shutdown_timeout(),
    )
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
