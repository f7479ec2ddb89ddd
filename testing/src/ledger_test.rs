//! Given-When-Then scenarios over [`LedgerState`].
//!
//! Operations are plain values ([`LedgerOp`]) so the same description can be
//! run by a scenario, replayed by a property test, or printed on failure.

#![allow(clippy::module_name_repetitions)] // LedgerTest is the natural name

use train_ticket_core::{
    LedgerError, LedgerState, Passenger, PurchaseReceipt, Removal, SeatChange, Section, Ticket,
    TicketNumber,
};

/// Type alias for state assertion functions
type StateAssertion = Box<dyn FnOnce(&LedgerState)>;

/// Type alias for outcome assertion functions
type OutcomeAssertion = Box<dyn FnOnce(&LedgerOutcome)>;

/// One ledger operation, as a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerOp {
    /// Buy a ticket
    Purchase {
        /// Origin
        from: String,
        /// Destination
        to: String,
        /// Passenger
        user: Passenger,
    },
    /// Look up a ticket
    Receipt(TicketNumber),
    /// List tickets in a section
    BySection(String),
    /// Remove a ticket
    Remove(TicketNumber),
    /// Move a ticket to another section
    ModifySeat {
        /// Ticket to move
        ticket_number: TicketNumber,
        /// Destination section
        new_section: Section,
    },
}

/// What an operation returned.
#[derive(Clone, Debug, PartialEq)]
pub enum LedgerOutcome {
    /// Result of [`LedgerOp::Purchase`]
    Purchased(Result<PurchaseReceipt, LedgerError>),
    /// Result of [`LedgerOp::Receipt`]
    Receipt(Result<Ticket, LedgerError>),
    /// Result of [`LedgerOp::BySection`]
    Tickets(Vec<Ticket>),
    /// Result of [`LedgerOp::Remove`]
    Removed(Removal),
    /// Result of [`LedgerOp::ModifySeat`]
    SeatModified(Result<SeatChange, LedgerError>),
}

impl LedgerOutcome {
    /// The error carried by the outcome, if any.
    #[must_use]
    pub fn error(&self) -> Option<&LedgerError> {
        match self {
            Self::Purchased(Err(error))
            | Self::Receipt(Err(error))
            | Self::SeatModified(Err(error)) => Some(error),
            _ => None,
        }
    }
}

impl LedgerOp {
    /// Purchase for `user` between two fixed stations.
    #[must_use]
    pub fn purchase(user: Passenger) -> Self {
        Self::Purchase {
            from: "London".to_string(),
            to: "France".to_string(),
            user,
        }
    }

    /// Seat modification into `new_section`.
    #[must_use]
    pub fn modify_seat(ticket_number: i32, new_section: &str) -> Self {
        Self::ModifySeat {
            ticket_number: TicketNumber::new(ticket_number),
            new_section: Section::from(new_section),
        }
    }

    /// Whether the operation may change state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Purchase { .. } | Self::Remove(_) | Self::ModifySeat { .. }
        )
    }

    /// Applies the operation to `state`.
    pub fn apply(self, state: &mut LedgerState) -> LedgerOutcome {
        match self {
            Self::Purchase { from, to, user } => {
                LedgerOutcome::Purchased(state.purchase(from, to, user))
            }
            Self::Receipt(ticket_number) => {
                LedgerOutcome::Receipt(state.receipt(ticket_number).cloned())
            }
            Self::BySection(section) => LedgerOutcome::Tickets(state.tickets_in_section(&section)),
            Self::Remove(ticket_number) => LedgerOutcome::Removed(state.remove(ticket_number)),
            Self::ModifySeat {
                ticket_number,
                new_section,
            } => LedgerOutcome::SeatModified(state.modify_seat(ticket_number, &new_section)),
        }
    }
}

/// Fluent API for ledger scenarios with Given-When-Then syntax
///
/// # Example
///
/// ```
/// use train_ticket_testing::{LedgerOp, LedgerOutcome, LedgerTest, fixtures::alice};
///
/// LedgerTest::new()
///     .given_purchases(10)
///     .when(LedgerOp::purchase(alice()))
///     .then_outcome(|outcome| {
///         let LedgerOutcome::Purchased(Ok(receipt)) = outcome else {
///             panic!("expected a purchase, got {outcome:?}");
///         };
///         assert_eq!(receipt.seat_number.as_str(), "2A");
///     })
///     .run();
/// ```
pub struct LedgerTest {
    state: LedgerState,
    ops: Vec<LedgerOp>,
    state_assertions: Vec<StateAssertion>,
    outcome_assertions: Vec<OutcomeAssertion>,
}

impl LedgerTest {
    /// Start from a fresh standard ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::given_state(LedgerState::default())
    }

    /// Start from the given state (Given)
    #[must_use]
    pub fn given_state(state: LedgerState) -> Self {
        Self {
            state,
            ops: Vec::new(),
            state_assertions: Vec::new(),
            outcome_assertions: Vec::new(),
        }
    }

    /// Apply `count` purchases before the operations under test (Given)
    ///
    /// # Panics
    ///
    /// Panics if any of the setup purchases fails.
    #[must_use]
    #[allow(clippy::panic)] // Test setup
    pub fn given_purchases(mut self, count: usize) -> Self {
        for index in 0..count {
            let user = crate::fixtures::passenger(&format!("User{index}"));
            if let Err(error) = self.state.purchase("London".into(), "France".into(), user) {
                panic!("setup purchase {index} failed: {error}");
            }
        }
        self
    }

    /// Queue an operation to run (When)
    ///
    /// Outcome assertions see the outcome of the last queued operation.
    #[must_use]
    pub fn when(mut self, op: LedgerOp) -> Self {
        self.ops.push(op);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&LedgerState) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the last outcome (Then)
    #[must_use]
    pub fn then_outcome<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&LedgerOutcome) + 'static,
    {
        self.outcome_assertions.push(Box::new(assertion));
        self
    }

    /// Run the operations and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if no operation was queued, or if any assertion fails.
    #[allow(clippy::panic)] // Test code can panic
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self.state;
        let last = self
            .ops
            .into_iter()
            .map(|op| op.apply(&mut state))
            .last()
            .expect("An operation must be queued with when()");

        for assertion in self.state_assertions {
            assertion(&state);
        }

        for assertion in self.outcome_assertions {
            assertion(&last);
        }
    }
}

impl Default for LedgerTest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::fixtures::alice;

    #[test]
    fn test_purchase_scenario() {
        LedgerTest::new()
            .when(LedgerOp::purchase(alice()))
            .then_state(|state| {
                assert_eq!(state.ticket_count(), 1);
                assert_eq!(state.available_in("A"), 9);
            })
            .then_outcome(|outcome| {
                let LedgerOutcome::Purchased(Ok(receipt)) = outcome else {
                    panic!("unexpected outcome {outcome:?}");
                };
                assert_eq!(receipt.seat_number.as_str(), "1A");
            })
            .run();
    }

    #[test]
    fn test_outcome_of_last_operation_is_checked() {
        LedgerTest::new()
            .given_purchases(1)
            .when(LedgerOp::Remove(TicketNumber::FIRST))
            .when(LedgerOp::Receipt(TicketNumber::FIRST))
            .then_outcome(|outcome| {
                assert_eq!(
                    outcome.error(),
                    Some(&LedgerError::NotFound(TicketNumber::FIRST))
                );
            })
            .run();
    }

    #[test]
    fn test_mutation_classification() {
        assert!(LedgerOp::purchase(alice()).is_mutation());
        assert!(!LedgerOp::BySection("A".to_string()).is_mutation());
    }
}
