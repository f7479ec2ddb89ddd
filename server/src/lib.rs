//! # Train Ticket Server
//!
//! Process wiring for the train ticket service: configuration from the
//! environment, the Prometheus exporter, and the HTTP server with graceful
//! shutdown.
//!
//! ```text
//! ┌───────────────┐   ┌────────────────────┐   ┌──────────────────┐
//! │ Config (env)  │ → │ Ledger (core)      │ → │ Router (web)     │
//! │ dotenvy       │   │ one Mutex, shared  │   │ axum, JSON       │
//! └───────────────┘   └────────────────────┘   └──────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod metrics;

pub use config::{Config, ConfigError};
pub use metrics::MetricsError;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use axum::Router;
use tokio::sync::Notify;

/// Serve `app` on `listener` until `shutdown` completes.
///
/// After the shutdown future resolves the server stops accepting connections
/// and in-flight requests get `drain_timeout` to finish. Past that the accept
/// loop is aborted and this returns without waiting for the stragglers.
///
/// # Errors
///
/// Returns the server's I/O error, if any.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    drain_timeout: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let stop = Arc::new(Notify::new());
    let stopped = Arc::clone(&stop);

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { stopped.notified().await });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server => return flatten(joined),
        () = shutdown => {}
    }

    stop.notify_one();
    if let Ok(joined) = tokio::time::timeout(drain_timeout, &mut server).await {
        flatten(joined)
    } else {
        tracing::warn!(
            timeout_secs = drain_timeout.as_secs(),
            "Drain timeout elapsed, abandoning in-flight requests"
        );
        server.abort();
        Ok(())
    }
}

fn flatten(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> std::io::Result<()> {
    joined.map_err(std::io::Error::other)?
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
///
/// If a handler cannot be installed the error is logged and that signal is
/// ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
