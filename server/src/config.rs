//! Configuration management for the train ticket server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Unparsable numbers fall back to their default; the seat layout is
//! validated separately by [`Config::seat_map`].

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;
use thiserror::Error;
use train_ticket_core::{LedgerConfig, LedgerError, SeatMap};

/// Errors produced while turning configuration into runtime values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `TRAIN_SECTIONS` named no section
    #[error("TRAIN_SECTIONS must name at least one section")]
    NoSections,
    /// A section name appears twice
    #[error("duplicate section {0} in TRAIN_SECTIONS")]
    DuplicateSection(String),
    /// `SEATS_PER_SECTION` out of range
    #[error("SEATS_PER_SECTION must be between 1 and {max}, got {value}")]
    SeatsPerSection {
        /// Configured value
        value: usize,
        /// Largest supported value
        max: usize,
    },
    /// `TICKET_PRICE` negative or not finite
    #[error("TICKET_PRICE must be a non-negative number, got {0}")]
    TicketPrice(f32),
    /// Host and port do not form a socket address
    #[error("invalid listen address {addr}: {source}")]
    Address {
        /// The offending `host:port`
        addr: String,
        /// Parse failure
        #[source]
        source: AddrParseError,
    },
    /// The ledger rejected the seat layout
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Metrics exporter configuration
    pub metrics: MetricsConfig,
    /// Train layout and pricing
    pub train: TrainConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

/// Prometheus exporter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether to install the exporter
    pub enabled: bool,
    /// Exporter host
    pub host: String,
    /// Exporter port
    pub port: u16,
}

/// Train layout and pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Section names in allocation priority order
    pub sections: Vec<String>,
    /// Seats in each section
    pub seats_per_section: usize,
    /// Price charged per ticket
    pub ticket_price: f32,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse_with<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
        ) -> Option<T> {
            lookup(key).and_then(|s| s.trim().parse().ok())
        }

        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_with(&lookup, "PORT").unwrap_or(50051),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
                shutdown_timeout: parse_with(&lookup, "SHUTDOWN_TIMEOUT").unwrap_or(30),
            },
            metrics: MetricsConfig {
                enabled: lookup("METRICS_ENABLED").map_or(true, |s| parse_bool(&s)),
                host: lookup("METRICS_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_with(&lookup, "METRICS_PORT").unwrap_or(9090),
            },
            train: TrainConfig {
                sections: lookup("TRAIN_SECTIONS").map_or_else(
                    || vec!["A".to_string(), "B".to_string()],
                    |s| split_sections(&s),
                ),
                seats_per_section: parse_with(&lookup, "SEATS_PER_SECTION").unwrap_or(10),
                ticket_price: parse_with(&lookup, "TICKET_PRICE")
                    .unwrap_or(train_ticket_core::DEFAULT_TICKET_PRICE),
            },
        }
    }

    /// Address the HTTP server listens on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Address`] if host and port do not parse.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr(&self.server.host, self.server.port)
    }

    /// Address the metrics exporter listens on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Address`] if host and port do not parse.
    pub fn metrics_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr(&self.metrics.host, self.metrics.port)
    }

    /// Time allowed for in-flight requests after a shutdown signal.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }

    /// Seat layout described by the train configuration.
    ///
    /// # Errors
    ///
    /// Fails if no section is named, a section repeats, or the seat count is
    /// outside `1..=26`.
    pub fn seat_map(&self) -> Result<SeatMap, ConfigError> {
        let train = &self.train;
        if train.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }
        for (index, section) in train.sections.iter().enumerate() {
            if train.sections[..index].contains(section) {
                return Err(ConfigError::DuplicateSection(section.clone()));
            }
        }
        if !(1..=SeatMap::MAX_SEATS_PER_SECTION).contains(&train.seats_per_section) {
            return Err(ConfigError::SeatsPerSection {
                value: train.seats_per_section,
                max: SeatMap::MAX_SEATS_PER_SECTION,
            });
        }

        Ok(SeatMap::uniform(
            train.sections.iter().map(String::as_str),
            train.seats_per_section,
        )?)
    }

    /// Everything the ledger needs to start.
    ///
    /// # Errors
    ///
    /// Fails if the seat map is invalid or the price is negative or not finite.
    pub fn ledger_config(&self) -> Result<LedgerConfig, ConfigError> {
        let price = self.train.ticket_price;
        if !price.is_finite() || price < 0.0 {
            return Err(ConfigError::TicketPrice(price));
        }
        Ok(LedgerConfig::new(self.seat_map()?, price))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let addr = format!("{host}:{port}");
    addr.parse()
        .map_err(|source| ConfigError::Address { addr, source })
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_sections(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
