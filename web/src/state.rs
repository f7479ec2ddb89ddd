//! Application state for Axum handlers.

use train_ticket_core::Ledger;

/// State shared across all HTTP handlers.
///
/// Cloning is cheap: the ledger handle is reference counted.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// The seat and ticket ledger
    pub ledger: Ledger,
}

impl AppState {
    /// Wrap a ledger for use by the router.
    #[must_use]
    pub const fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }
}
