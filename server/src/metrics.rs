//! Prometheus exporter for the ledger metrics.
//!
//! Installs a global recorder with an HTTP scrape listener and registers the
//! ledger's metric descriptions.
//!
//! ```rust,no_run
//! use train_ticket_server::metrics::install_exporter;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! install_exporter("0.0.0.0:9090".parse()?)?;
//! // Metrics available at http://localhost:9090/metrics
//! # Ok(())
//! # }
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build or install the exporter
    #[error("Failed to install metrics exporter on {addr}: {message}")]
    Install {
        /// Scrape address
        addr: SocketAddr,
        /// Exporter error
        message: String,
    },
}

/// Install the Prometheus exporter listening on `addr`.
///
/// Must run inside a Tokio runtime; the scrape endpoint is served by a task
/// on that runtime.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a recorder is already installed or
/// the listener cannot be set up.
pub fn install_exporter(addr: SocketAddr) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MetricsError::Install {
            addr,
            message: e.to_string(),
        })?;

    train_ticket_core::metrics::register_ledger_metrics();
    tracing::info!(%addr, "Metrics exporter listening at http://{addr}/metrics");
    Ok(())
}
