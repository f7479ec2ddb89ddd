//! # Train Ticket Core
//!
//! In-memory seat inventory and ticket ledger for the train ticket service.
//!
//! The ledger owns two coupled structures, updated as one unit:
//!
//! - **Seat pools**: per section, an ordered queue of available seat labels.
//!   The head is allocated next; released seats join the tail.
//! - **Tickets**: live tickets keyed by a ticket number drawn from a counter
//!   that starts at 1 and never reuses a value.
//!
//! ```text
//!                ┌───────────────────────────────┐
//!   purchase ───▶│            Ledger             │
//!   receipt  ───▶│  Mutex<LedgerState>           │
//!   by section ─▶│   ├─ pools   A: 1A 1B … 1J    │
//!   remove   ───▶│   │          B: 2A 2B … 2J    │
//!   modify   ───▶│   ├─ tickets {n → Ticket}     │
//!                │   └─ next ticket number       │
//!                └───────────────────────────────┘
//! ```
//!
//! A seat is always in exactly one place: one section's pool, or one live
//! ticket. [`LedgerState`] holds the synchronous transitions; [`Ledger`] is
//! the shared handle that serializes them behind a single lock.
//!
//! ## Example
//!
//! ```
//! use train_ticket_core::{Ledger, Passenger, Removal, TicketNumber};
//!
//! # tokio_test::block_on(async {
//! let ledger = Ledger::default();
//! let user = Passenger::new("Alice", "Doe", "alice@example.com");
//!
//! let receipt = ledger.purchase("London", "France", user).await?;
//! assert_eq!(receipt.ticket_number, TicketNumber::FIRST);
//!
//! let change = ledger.modify_seat(receipt.ticket_number, "B").await?;
//! assert_eq!(change.seat_number.as_str(), "2A");
//!
//! let removal = ledger.remove(receipt.ticket_number).await;
//! assert!(matches!(removal, Removal::Removed(_)));
//! # Ok::<(), train_ticket_core::LedgerError>(())
//! # });
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod seat_map;
pub mod state;
pub mod types;

pub use config::{DEFAULT_TICKET_PRICE, LedgerConfig};
pub use error::{CapacityScope, LedgerError};
pub use ledger::Ledger;
pub use seat_map::SeatMap;
pub use state::LedgerState;
pub use types::*;
