//! Ledger state and its transitions.
//!
//! [`LedgerState`] is the plain, synchronous aggregate: seat pools, live
//! tickets and the ticket counter. Every method either applies its whole
//! effect or returns an error without touching anything. Concurrent callers
//! go through [`crate::Ledger`], which owns one of these behind a mutex.

use crate::config::LedgerConfig;
use crate::error::{CapacityScope, LedgerError};
use crate::types::{
    LedgerSnapshot, Passenger, PurchaseReceipt, Removal, SeatChange, SeatLabel, Section,
    SectionAvailability, Ticket, TicketNumber,
};
use std::collections::{HashMap, VecDeque};

/// Seat pools, live tickets and the ticket counter, updated as one unit.
#[derive(Clone, Debug)]
pub struct LedgerState {
    /// Section priority order, fixed at construction.
    sections: Vec<Section>,
    /// Available seats per section; head is allocated next, releases go to the tail.
    available: HashMap<Section, VecDeque<SeatLabel>>,
    tickets: HashMap<TicketNumber, Ticket>,
    next_ticket_number: TicketNumber,
    ticket_price: f32,
}

/// Counts reported to metrics after each operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Occupancy {
    pub(crate) active_tickets: usize,
    pub(crate) seats_available: Vec<(Section, usize)>,
}

impl LedgerState {
    /// Builds a fresh ledger: every seat available, no tickets, counter at 1.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        let sections: Vec<Section> = config.seat_map.sections().cloned().collect();
        let available = config
            .seat_map
            .layout()
            .map(|(section, seats)| (section.clone(), seats.iter().cloned().collect()))
            .collect();

        Self {
            sections,
            available,
            tickets: HashMap::new(),
            next_ticket_number: TicketNumber::FIRST,
            ticket_price: config.ticket_price,
        }
    }

    /// Sells the head seat of the first section that still has one.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::CapacityExhausted`] with [`CapacityScope::AnySection`]
    ///   when every pool is empty
    /// - [`LedgerError::TicketNumbersExhausted`] when the counter cannot advance
    pub fn purchase(
        &mut self,
        from: String,
        to: String,
        user: Passenger,
    ) -> Result<PurchaseReceipt, LedgerError> {
        let exhausted = || LedgerError::CapacityExhausted {
            scope: CapacityScope::AnySection,
        };

        let section = self
            .sections
            .iter()
            .find(|section| self.available_in(section.as_str()) > 0)
            .cloned()
            .ok_or_else(exhausted)?;

        let ticket_number = self.next_ticket_number;
        let next_ticket_number = ticket_number
            .next()
            .ok_or(LedgerError::TicketNumbersExhausted)?;

        let seat_number = self
            .available
            .get_mut(&section)
            .and_then(VecDeque::pop_front)
            .ok_or_else(exhausted)?;

        self.next_ticket_number = next_ticket_number;
        self.tickets.insert(
            ticket_number,
            Ticket {
                from,
                to,
                user,
                price_paid: self.ticket_price,
                seat_number: seat_number.clone(),
                section: section.clone(),
                ticket_number,
            },
        );

        Ok(PurchaseReceipt {
            ticket_number,
            seat_number,
            section,
            price_paid: self.ticket_price,
        })
    }

    /// Looks up a live ticket.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the number was never issued or
    /// the ticket has been removed.
    pub fn receipt(&self, ticket_number: TicketNumber) -> Result<&Ticket, LedgerError> {
        self.tickets
            .get(&ticket_number)
            .ok_or(LedgerError::NotFound(ticket_number))
    }

    /// Live tickets seated in `section`, ordered by ticket number.
    ///
    /// Unknown sections simply have no tickets.
    #[must_use]
    pub fn tickets_in_section(&self, section: &str) -> Vec<Ticket> {
        let mut tickets: Vec<Ticket> = self
            .tickets
            .values()
            .filter(|ticket| ticket.section.as_str() == section)
            .cloned()
            .collect();
        tickets.sort_by_key(|ticket| ticket.ticket_number);
        tickets
    }

    /// Removes a ticket and returns its seat to the tail of its section's pool.
    ///
    /// An unknown number is reported as [`Removal::NotFound`], not an error.
    pub fn remove(&mut self, ticket_number: TicketNumber) -> Removal {
        match self.tickets.remove(&ticket_number) {
            Some(ticket) => {
                self.release(&ticket.section, ticket.seat_number.clone());
                Removal::Removed(ticket)
            }
            None => Removal::NotFound(ticket_number),
        }
    }

    /// Moves a ticket to the head seat of `new_section`.
    ///
    /// The destination is checked before anything is released, so a full
    /// destination leaves the ticket in its current seat.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the ticket is not live
    /// - [`LedgerError::CapacityExhausted`] naming `new_section` if it has no
    ///   available seat (unknown sections have none)
    pub fn modify_seat(
        &mut self,
        ticket_number: TicketNumber,
        new_section: &Section,
    ) -> Result<SeatChange, LedgerError> {
        let Some(ticket) = self.tickets.get_mut(&ticket_number) else {
            return Err(LedgerError::NotFound(ticket_number));
        };

        // Releasing first would never change the head of a non-empty pool,
        // so taking the head before the release is equivalent.
        let seat_number = self
            .available
            .get_mut(new_section)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| LedgerError::CapacityExhausted {
                scope: CapacityScope::Section(new_section.clone()),
            })?;

        let previous_section = std::mem::replace(&mut ticket.section, new_section.clone());
        let previous_seat = std::mem::replace(&mut ticket.seat_number, seat_number.clone());

        self.available
            .entry(previous_section.clone())
            .or_default()
            .push_back(previous_seat.clone());

        Ok(SeatChange {
            ticket_number,
            previous_section,
            previous_seat,
            section: new_section.clone(),
            seat_number,
        })
    }

    /// Available seats of every section, in priority order.
    #[must_use]
    pub fn availability(&self) -> Vec<SectionAvailability> {
        self.sections
            .iter()
            .map(|section| SectionAvailability {
                section: section.clone(),
                seats: self
                    .available
                    .get(section)
                    .map(|pool| pool.iter().cloned().collect())
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Copies the whole ledger.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut tickets: Vec<Ticket> = self.tickets.values().cloned().collect();
        tickets.sort_by_key(|ticket| ticket.ticket_number);

        LedgerSnapshot {
            sections: self.availability(),
            tickets,
            next_ticket_number: self.next_ticket_number,
        }
    }

    /// Number of available seats in `section` (zero if unknown).
    #[must_use]
    pub fn available_in(&self, section: &str) -> usize {
        self.available.get(section).map_or(0, VecDeque::len)
    }

    /// Number of live tickets.
    #[must_use]
    pub fn ticket_count(&self) -> usize {
        self.tickets.len()
    }

    /// Number the next purchase will receive.
    #[must_use]
    pub const fn next_ticket_number(&self) -> TicketNumber {
        self.next_ticket_number
    }

    pub(crate) fn occupancy(&self) -> Occupancy {
        Occupancy {
            active_tickets: self.tickets.len(),
            seats_available: self
                .sections
                .iter()
                .map(|section| (section.clone(), self.available_in(section.as_str())))
                .collect(),
        }
    }

    fn release(&mut self, section: &Section, seat: SeatLabel) {
        self.available
            .entry(section.clone())
            .or_default()
            .push_back(seat);
    }

    #[cfg(test)]
    pub(crate) fn set_next_ticket_number(&mut self, next: TicketNumber) {
        self.next_ticket_number = next;
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn alice() -> Passenger {
        Passenger::new("Alice", "Doe", "alice@example.com")
    }

    fn buy(state: &mut LedgerState) -> Result<PurchaseReceipt, LedgerError> {
        state.purchase("London".to_string(), "France".to_string(), alice())
    }

    fn pool(state: &LedgerState, section: &str) -> Vec<String> {
        state
            .availability()
            .into_iter()
            .find(|a| a.section.as_str() == section)
            .map(|a| a.seats.into_iter().map(|s| s.as_str().to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn first_purchase_takes_head_of_first_section() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        assert_eq!(receipt.ticket_number, TicketNumber::FIRST);
        assert_eq!(receipt.seat_number.as_str(), "1A");
        assert_eq!(receipt.section.as_str(), "A");
        assert!((receipt.price_paid - 20.0).abs() < f32::EPSILON);
        assert_eq!(state.available_in("A"), 9);
        assert_eq!(state.next_ticket_number(), TicketNumber::new(2));
    }

    #[test]
    fn receipt_of_unknown_ticket_is_not_found() {
        let state = LedgerState::default();
        assert_eq!(
            state.receipt(TicketNumber::new(122)),
            Err(LedgerError::NotFound(TicketNumber::new(122)))
        );
    }

    #[test]
    fn removal_releases_seat_to_tail() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        let removal = state.remove(receipt.ticket_number);
        assert!(removal.is_removed());
        assert_eq!(pool(&state, "A").last().map(String::as_str), Some("1A"));
        assert_eq!(pool(&state, "A").first().map(String::as_str), Some("1B"));

        // The released seat is handed out only after the original ones.
        let next = buy(&mut state).unwrap();
        assert_eq!(next.seat_number.as_str(), "1B");
        assert_eq!(next.ticket_number, TicketNumber::new(2));
    }

    #[test]
    fn removing_twice_reports_not_found() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        state.remove(receipt.ticket_number);
        assert_eq!(
            state.remove(receipt.ticket_number),
            Removal::NotFound(receipt.ticket_number)
        );
    }

    #[test]
    fn modify_seat_moves_to_destination_head() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        let change = state
            .modify_seat(receipt.ticket_number, &Section::from("B"))
            .unwrap();
        assert_eq!(change.seat_number.as_str(), "2A");
        assert_eq!(change.previous_seat.as_str(), "1A");

        let ticket = state.receipt(receipt.ticket_number).unwrap();
        assert_eq!(ticket.section.as_str(), "B");
        assert_eq!(ticket.seat_number.as_str(), "2A");
        assert_eq!(pool(&state, "A").last().map(String::as_str), Some("1A"));
        assert_eq!(state.available_in("B"), 9);
    }

    #[test]
    fn modify_seat_within_same_section_takes_head_then_releases() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        let change = state
            .modify_seat(receipt.ticket_number, &Section::from("A"))
            .unwrap();
        assert_eq!(change.seat_number.as_str(), "1B");
        assert_eq!(pool(&state, "A").last().map(String::as_str), Some("1A"));
        assert_eq!(state.available_in("A"), 9);
    }

    #[test]
    fn modify_seat_into_full_section_changes_nothing() {
        let mut state = LedgerState::default();
        for _ in 0..20 {
            buy(&mut state).unwrap();
        }
        let first = TicketNumber::FIRST;
        state.remove(TicketNumber::new(20));

        let before = state.snapshot();
        let err = state.modify_seat(first, &Section::from("A")).unwrap_err();
        assert_eq!(
            err,
            LedgerError::CapacityExhausted {
                scope: CapacityScope::Section(Section::from("A"))
            }
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn modify_seat_into_unknown_section_is_capacity_exhausted() {
        let mut state = LedgerState::default();
        let receipt = buy(&mut state).unwrap();

        let err = state
            .modify_seat(receipt.ticket_number, &Section::from("Z"))
            .unwrap_err();
        assert_eq!(err.to_string(), "no available seats in section Z");
        assert_eq!(state.receipt(receipt.ticket_number).unwrap().seat_number.as_str(), "1A");
    }

    #[test]
    fn modify_seat_of_unknown_ticket_is_not_found() {
        let mut state = LedgerState::default();
        assert_eq!(
            state.modify_seat(TicketNumber::new(7), &Section::from("B")),
            Err(LedgerError::NotFound(TicketNumber::new(7)))
        );
    }

    #[test]
    fn counter_overflow_leaves_state_untouched() {
        let mut state = LedgerState::default();
        state.set_next_ticket_number(TicketNumber::new(i32::MAX));

        let before = state.snapshot();
        assert_eq!(buy(&mut state), Err(LedgerError::TicketNumbersExhausted));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn unknown_section_has_no_tickets() {
        let mut state = LedgerState::default();
        buy(&mut state).unwrap();
        assert!(state.tickets_in_section("C").is_empty());
        assert_eq!(state.tickets_in_section("A").len(), 1);
    }
}
