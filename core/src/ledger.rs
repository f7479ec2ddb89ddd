//! Shared, concurrency-safe handle to the ledger.
//!
//! Every operation takes one exclusive lock over the whole [`LedgerState`]
//! for its entire read-modify-write sequence. Pools, tickets and the counter
//! are never locked independently, so two purchasers can never race for the
//! same head seat.
//!
//! The guard is scoped to a block that only runs synchronous state code: no
//! `.await` or I/O happens while it is held, and once acquired the transition
//! always runs to completion. Occupancy gauges are set before the guard is
//! released so they follow commit order; counters and logs are emitted after.

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::metrics;
use crate::state::LedgerState;
use crate::types::{
    LedgerSnapshot, Passenger, PurchaseReceipt, Removal, SeatChange, Section,
    SectionAvailability, Ticket, TicketNumber,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Cloneable handle to a single in-memory ledger.
///
/// Build one at startup and hand clones to every request handler; all clones
/// share the same state.
///
/// # Example
///
/// ```
/// use train_ticket_core::{Ledger, LedgerConfig, Passenger};
///
/// # tokio_test::block_on(async {
/// let ledger = Ledger::new(&LedgerConfig::default());
/// let receipt = ledger
///     .purchase("London", "France", Passenger::new("Alice", "Doe", "alice@example.com"))
///     .await?;
///
/// assert_eq!(receipt.seat_number.as_str(), "1A");
/// assert_eq!(receipt.section.as_str(), "A");
/// # Ok::<(), train_ticket_core::LedgerError>(())
/// # });
/// ```
#[derive(Clone, Debug)]
pub struct Ledger {
    state: Arc<Mutex<LedgerState>>,
}

impl Ledger {
    /// Creates a fresh ledger from a configuration.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self::from_state(LedgerState::new(config))
    }

    /// Wraps existing state.
    #[must_use]
    pub fn from_state(state: LedgerState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Sells a seat: head of the first section that still has one.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CapacityExhausted`] if every section is full
    /// - [`LedgerError::TicketNumbersExhausted`] if the counter cannot advance
    #[tracing::instrument(skip_all, name = "ledger_purchase")]
    pub async fn purchase(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        user: Passenger,
    ) -> Result<PurchaseReceipt, LedgerError> {
        let (from, to) = (from.into(), to.into());
        let result = self.mutate(|state| state.purchase(from, to, user)).await;

        match &result {
            Ok(receipt) => {
                metrics::record_purchase(&receipt.section);
                tracing::info!(
                    ticket_number = %receipt.ticket_number,
                    seat = %receipt.seat_number,
                    section = %receipt.section,
                    "Ticket purchased"
                );
            }
            Err(error) => {
                metrics::record_rejection(error);
                tracing::warn!(%error, "Purchase rejected");
            }
        }

        result
    }

    /// Returns a copy of a live ticket.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the ticket is not live.
    #[tracing::instrument(skip(self), name = "ledger_receipt")]
    pub async fn receipt(&self, ticket_number: TicketNumber) -> Result<Ticket, LedgerError> {
        let result = self
            .state(|state| state.receipt(ticket_number).cloned())
            .await;

        if let Err(error) = &result {
            metrics::record_rejection(error);
            tracing::debug!(%error, "Receipt lookup failed");
        }

        result
    }

    /// Live tickets in a section. Unknown sections yield an empty list.
    #[tracing::instrument(skip(self), name = "ledger_tickets_in_section")]
    pub async fn tickets_in_section(&self, section: &str) -> Vec<Ticket> {
        let tickets = self.state(|state| state.tickets_in_section(section)).await;
        tracing::debug!(count = tickets.len(), "Section tickets listed");
        tickets
    }

    /// Removes a ticket, returning its seat to the tail of its section's pool.
    ///
    /// Removing an unknown ticket is not an error: it yields
    /// [`Removal::NotFound`] with its own message.
    #[tracing::instrument(skip(self), name = "ledger_remove")]
    pub async fn remove(&self, ticket_number: TicketNumber) -> Removal {
        let removal = self.mutate(|state| state.remove(ticket_number)).await;

        metrics::record_removal(removal.is_removed());
        match &removal {
            Removal::Removed(ticket) => tracing::info!(
                seat = %ticket.seat_number,
                section = %ticket.section,
                "Ticket removed"
            ),
            Removal::NotFound(_) => tracing::debug!("Removal of unknown ticket"),
        }

        removal
    }

    /// Moves a ticket to the head seat of `new_section`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the ticket is not live
    /// - [`LedgerError::CapacityExhausted`] naming the section if it is full
    ///   or unknown; the ticket keeps its current seat
    #[tracing::instrument(skip(self, new_section), fields(new_section = tracing::field::Empty), name = "ledger_modify_seat")]
    pub async fn modify_seat(
        &self,
        ticket_number: TicketNumber,
        new_section: impl Into<Section>,
    ) -> Result<SeatChange, LedgerError> {
        let new_section = new_section.into();
        tracing::Span::current().record("new_section", tracing::field::display(&new_section));

        let result = self
            .mutate(|state| state.modify_seat(ticket_number, &new_section))
            .await;

        match &result {
            Ok(change) => {
                metrics::record_seat_modified();
                tracing::info!(
                    from_seat = %change.previous_seat,
                    from_section = %change.previous_section,
                    seat = %change.seat_number,
                    section = %change.section,
                    "Seat modified"
                );
            }
            Err(error) => {
                metrics::record_rejection(error);
                tracing::warn!(%error, "Seat modification rejected");
            }
        }

        result
    }

    /// Available seats per section, in priority order.
    pub async fn availability(&self) -> Vec<SectionAvailability> {
        self.state(LedgerState::availability).await
    }

    /// Consistent copy of the whole ledger.
    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.state(LedgerState::snapshot).await
    }

    /// Reads the state under the lock.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&LedgerState) -> T,
    {
        let state = self.state.lock().await;
        f(&state)
    }

    /// Publishes the occupancy gauges for the current state.
    ///
    /// Gauges are otherwise refreshed only after mutations, so call this once
    /// after installing a recorder to expose the initial seat counts.
    pub async fn publish_occupancy(&self) {
        self.state(|state| metrics::update_occupancy(&state.occupancy()))
            .await;
    }

    /// Applies a transition and publishes occupancy gauges under the lock.
    async fn mutate<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut LedgerState) -> T,
    {
        let mut state = self.state.lock().await;
        let result = f(&mut state);
        metrics::update_occupancy(&state.occupancy());
        result
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}
