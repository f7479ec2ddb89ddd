//! # Train Ticket Testing
//!
//! Testing utilities for the train ticket ledger.
//!
//! This crate provides:
//! - Passenger and ledger fixtures
//! - A Given-When-Then scenario builder over [`LedgerState`](train_ticket_core::LedgerState)
//! - Invariant assertions for ledger snapshots
//! - `proptest` strategies producing random operation sequences
//!
//! ## Example
//!
//! ```
//! use train_ticket_testing::{assertions, fixtures};
//! use train_ticket_core::SeatMap;
//!
//! # tokio_test::block_on(async {
//! let ledger = fixtures::standard_ledger();
//! fixtures::purchase_many(&ledger, 3).await;
//!
//! let snapshot = ledger.snapshot().await;
//! assertions::assert_seat_universe(&snapshot, &SeatMap::standard());
//! # });
//! ```

pub mod ledger_test;

pub use ledger_test::{LedgerOp, LedgerOutcome, LedgerTest};

/// Passenger and ledger fixtures.
pub mod fixtures {
    use train_ticket_core::{Ledger, LedgerError, Passenger, PurchaseReceipt};

    /// The passenger used throughout the examples.
    #[must_use]
    pub fn alice() -> Passenger {
        Passenger::new("Alice", "Doe", "alice@example.com")
    }

    /// A passenger with the given first name and a derived email.
    #[must_use]
    pub fn passenger(first_name: &str) -> Passenger {
        Passenger::new(
            first_name,
            "Doe",
            format!("{}@example.com", first_name.to_lowercase()),
        )
    }

    /// A fresh ledger with the standard two-section layout.
    #[must_use]
    pub fn standard_ledger() -> Ledger {
        Ledger::default()
    }

    /// Runs `count` sequential purchases, one passenger per purchase.
    pub async fn purchase_many(
        ledger: &Ledger,
        count: usize,
    ) -> Vec<Result<PurchaseReceipt, LedgerError>> {
        let mut results = Vec::with_capacity(count);
        for index in 1..=count {
            let user = passenger(&format!("User{index}"));
            results.push(ledger.purchase("London", "France", user).await);
        }
        results
    }
}

/// Invariant assertions over ledger snapshots.
pub mod assertions {
    use std::collections::{HashMap, HashSet};
    use train_ticket_core::{LedgerSnapshot, SeatMap, TicketNumber};

    /// Assert that available and assigned seats together form the seat
    /// universe of `seat_map`, each seat exactly once.
    ///
    /// # Panics
    ///
    /// Panics if a seat is duplicated, missing, or unknown to the map.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_seat_universe(snapshot: &LedgerSnapshot, seat_map: &SeatMap) {
        let mut seen = HashSet::new();
        for seat in snapshot.all_seats() {
            assert!(
                seen.insert(seat.as_str()),
                "Seat {seat} is both available and assigned, or assigned twice"
            );
        }

        let universe: HashSet<&str> = seat_map.seats().map(|seat| seat.as_str()).collect();
        assert_eq!(
            seen, universe,
            "Ledger seats do not match the seat map universe"
        );
    }

    /// Assert that every seat sits in the section it belongs to in
    /// `seat_map`, whether available or assigned.
    ///
    /// # Panics
    ///
    /// Panics if a seat is found in a foreign section.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_seats_in_home_sections(snapshot: &LedgerSnapshot, seat_map: &SeatMap) {
        let home: HashMap<&str, &str> = seat_map
            .layout()
            .flat_map(|(section, seats)| {
                seats
                    .iter()
                    .map(move |seat| (seat.as_str(), section.as_str()))
            })
            .collect();

        for availability in &snapshot.sections {
            for seat in &availability.seats {
                assert_eq!(
                    home.get(seat.as_str()),
                    Some(&availability.section.as_str()),
                    "Available seat {seat} is pooled in the wrong section"
                );
            }
        }
        for ticket in &snapshot.tickets {
            assert_eq!(
                home.get(ticket.seat_number.as_str()),
                Some(&ticket.section.as_str()),
                "Ticket {} holds seat {} outside its section",
                ticket.ticket_number,
                ticket.seat_number
            );
        }
    }

    /// Assert that live ticket numbers are unique and were all issued before
    /// the current counter value.
    ///
    /// # Panics
    ///
    /// Panics if a number repeats or lies outside `1..next_ticket_number`.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_ticket_numbers_issued(snapshot: &LedgerSnapshot) {
        let mut seen = HashSet::new();
        for ticket in &snapshot.tickets {
            let number = ticket.ticket_number;
            assert!(seen.insert(number), "Ticket number {number} appears twice");
            assert!(
                number >= TicketNumber::FIRST && number < snapshot.next_ticket_number,
                "Ticket number {number} was never issued (next is {})",
                snapshot.next_ticket_number
            );
        }
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use crate::ledger_test::LedgerOp;
    use proptest::prelude::*;
    use train_ticket_core::{Passenger, TicketNumber};

    /// Section names used by generated operations, including one that does
    /// not exist in the standard map.
    pub const SECTIONS: [&str; 3] = ["A", "B", "C"];

    /// Random passenger records.
    pub fn arb_passenger() -> impl Strategy<Value = Passenger> {
        ("[A-Z][a-z]{1,8}", "[A-Z][a-z]{1,8}").prop_map(|(first, last)| {
            let email = format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase());
            Passenger::new(first, last, email)
        })
    }

    /// Ticket numbers around the range a short sequence can issue.
    pub fn arb_ticket_number() -> impl Strategy<Value = TicketNumber> {
        (-1i32..40).prop_map(TicketNumber::new)
    }

    /// One random ledger operation, weighted towards mutations.
    pub fn arb_op() -> impl Strategy<Value = LedgerOp> {
        prop_oneof![
            4 => arb_passenger().prop_map(LedgerOp::purchase),
            1 => arb_ticket_number().prop_map(LedgerOp::Receipt),
            1 => prop::sample::select(SECTIONS.to_vec())
                .prop_map(|section| LedgerOp::BySection(section.to_string())),
            2 => arb_ticket_number().prop_map(LedgerOp::Remove),
            2 => (arb_ticket_number(), prop::sample::select(SECTIONS.to_vec())).prop_map(
                |(ticket_number, section)| LedgerOp::modify_seat(ticket_number.get(), section)
            ),
        ]
    }

    /// Sequences of up to `max_len` random operations.
    pub fn arb_ops(max_len: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
        prop::collection::vec(arb_op(), 0..max_len)
    }
}
