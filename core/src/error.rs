//! Error types for ledger operations.

use crate::types::{Section, TicketNumber};
use std::fmt;
use thiserror::Error;

/// Where a capacity check ran out of seats.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CapacityScope {
    /// Every section was empty (purchase).
    AnySection,
    /// The named destination section was empty (seat modification).
    Section(Section),
}

impl fmt::Display for CapacityScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnySection => f.write_str("any of sections"),
            Self::Section(section) => write!(f, "section {section}"),
        }
    }
}

/// Errors returned by the ledger.
///
/// All variants describe current state rather than a transient fault: retrying
/// without some other state change (a removal, say) fails the same way. A
/// failing operation never leaves partial mutation behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The referenced ticket is not live.
    #[error("ticket not found for ticket: {0}")]
    NotFound(TicketNumber),

    /// No seats available in the relevant scope.
    #[error("no available seats in {scope}")]
    CapacityExhausted {
        /// Scope that ran dry
        scope: CapacityScope,
    },

    /// The ticket counter cannot advance without overflowing.
    #[error("ticket numbers exhausted")]
    TicketNumbersExhausted,

    /// The seat map was rejected at construction.
    #[error("invalid seat map: {0}")]
    InvalidSeatMap(String),
}

impl LedgerError {
    /// Short machine-readable reason, used as a metrics label.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::CapacityExhausted { .. } => "capacity_exhausted",
            Self::TicketNumbersExhausted => "ticket_numbers_exhausted",
            Self::InvalidSeatMap(_) => "invalid_seat_map",
        }
    }
}
