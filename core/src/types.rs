//! Domain types for the train ticket ledger.
//!
//! Value objects (ticket numbers, sections, seat labels), the ticket entity,
//! and the result types returned by ledger operations.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// Messages
// ============================================================================

/// Message returned by a successful purchase.
pub const PURCHASE_SUCCEEDED: &str = "Ticket purchased successfully!";

/// Message returned when a ticket was removed.
pub const USER_REMOVED: &str = "User removed successfully.";

/// Message returned when removal targeted an unknown ticket.
pub const USER_NOT_FOUND: &str = "User not found.";

/// Message returned by a successful seat modification.
pub const SEAT_MODIFIED: &str = "User seat modified successfully.";

// ============================================================================
// Identifiers
// ============================================================================

/// Permanent identifier of one purchase.
///
/// Issued from a strictly increasing counter starting at 1 and never reused,
/// even after the ticket is removed. Signed 32-bit to match the wire format;
/// non-positive values are never issued but may still be looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(i32);

impl TicketNumber {
    /// The first ticket number issued by a fresh ledger.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw ticket number.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// The number after this one, or `None` on overflow.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

impl From<i32> for TicketNumber {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named partition of the seat map with its own availability pool.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    /// Creates a section identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the section name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Section {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Section {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl Borrow<str> for Section {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seat label, unique across the whole seat map (e.g. `1A`, `2J`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatLabel(String);

impl SeatLabel {
    /// Creates a seat label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SeatLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for SeatLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for SeatLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Passenger record embedded in every ticket.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passenger {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Contact email
    pub email: String,
}

impl Passenger {
    /// Creates a passenger record.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// One purchased ticket.
///
/// Only `seat_number` and `section` change after creation, and only through
/// a seat modification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Origin station
    pub from: String,
    /// Destination station
    pub to: String,
    /// Passenger who holds the ticket
    pub user: Passenger,
    /// Price paid at purchase
    pub price_paid: f32,
    /// Currently assigned seat
    pub seat_number: SeatLabel,
    /// Section of the assigned seat
    pub section: Section,
    /// Permanent ticket number
    pub ticket_number: TicketNumber,
}

// ============================================================================
// Operation results
// ============================================================================

/// Outcome of a successful purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Newly issued ticket number
    pub ticket_number: TicketNumber,
    /// Assigned seat
    pub seat_number: SeatLabel,
    /// Section the seat belongs to
    pub section: Section,
    /// Price charged
    pub price_paid: f32,
}

impl PurchaseReceipt {
    /// Confirmation message for the caller.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        PURCHASE_SUCCEEDED
    }
}

/// Outcome of a removal request.
///
/// Removing an unknown ticket is informational, not an error.
#[derive(Clone, Debug, PartialEq)]
pub enum Removal {
    /// The ticket existed; its seat went back to the tail of its section's pool.
    Removed(Ticket),
    /// No live ticket had this number.
    NotFound(TicketNumber),
}

impl Removal {
    /// Confirmation message for the caller.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Removed(_) => USER_REMOVED,
            Self::NotFound(_) => USER_NOT_FOUND,
        }
    }

    /// Whether a ticket was actually removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }
}

/// Outcome of a successful seat modification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatChange {
    /// Ticket that moved
    pub ticket_number: TicketNumber,
    /// Section before the move
    pub previous_section: Section,
    /// Seat released by the move
    pub previous_seat: SeatLabel,
    /// Section after the move
    pub section: Section,
    /// Seat assigned by the move
    pub seat_number: SeatLabel,
}

impl SeatChange {
    /// Confirmation message for the caller.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        SEAT_MODIFIED
    }
}

/// Available seats of one section, in allocation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAvailability {
    /// Section name
    pub section: Section,
    /// Available seats, head first
    pub seats: Vec<SeatLabel>,
}

impl SectionAvailability {
    /// Number of available seats.
    #[must_use]
    pub fn available(&self) -> usize {
        self.seats.len()
    }
}

/// Point-in-time copy of the whole ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerSnapshot {
    /// Availability per section, in section priority order
    pub sections: Vec<SectionAvailability>,
    /// Live tickets ordered by ticket number
    pub tickets: Vec<Ticket>,
    /// Number the next purchase will receive
    pub next_ticket_number: TicketNumber,
}

impl LedgerSnapshot {
    /// Total seats still available across all sections.
    #[must_use]
    pub fn available_seats(&self) -> usize {
        self.sections.iter().map(SectionAvailability::available).sum()
    }

    /// Every seat label, available or assigned.
    pub fn all_seats(&self) -> impl Iterator<Item = &SeatLabel> {
        self.sections
            .iter()
            .flat_map(|s| s.seats.iter())
            .chain(self.tickets.iter().map(|t| &t.seat_number))
    }
}
