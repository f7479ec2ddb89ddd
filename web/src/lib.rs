//! HTTP/JSON shim over the train ticket ledger.
//!
//! Each ledger operation is one Axum route. Handlers are thin: they parse the
//! request, call the shared [`Ledger`](train_ticket_core::Ledger), and map the
//! outcome to a response. Ledger errors become [`AppError`] responses with a
//! `{code, message}` body.
//!
//! | Route | Operation |
//! |-------|-----------|
//! | `POST /api/tickets` | purchase |
//! | `GET /api/tickets/:ticket_number` | receipt |
//! | `DELETE /api/tickets/:ticket_number` | remove passenger |
//! | `PUT /api/tickets/:ticket_number/seat` | modify seat |
//! | `GET /api/sections/:section/tickets` | tickets by section |
//! | `GET /api/sections` | availability |
//! | `GET /health`, `GET /ready` | probes |
//!
//! # Example
//!
//! ```no_run
//! use train_ticket_core::Ledger;
//! use train_ticket_web::{AppState, build_router};
//!
//! # async fn run() -> std::io::Result<()> {
//! let app = build_router(AppState::new(Ledger::default()));
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:50051").await?;
//! axum::serve(listener, app).await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::AppError;
pub use middleware::{CORRELATION_ID_HEADER, CorrelationId, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
