//! Construction parameters for a ledger.

use crate::seat_map::SeatMap;

/// Price charged for every ticket unless configured otherwise.
pub const DEFAULT_TICKET_PRICE: f32 = 20.0;

/// Seat layout and fixed fare for a ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerConfig {
    /// Sections and their initial seats
    pub seat_map: SeatMap,
    /// Price recorded on every ticket
    pub ticket_price: f32,
}

impl LedgerConfig {
    /// Creates a configuration.
    #[must_use]
    pub const fn new(seat_map: SeatMap, ticket_price: f32) -> Self {
        Self {
            seat_map,
            ticket_price,
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(SeatMap::standard(), DEFAULT_TICKET_PRICE)
    }
}
