//! Business metrics for the ticket ledger.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! process installs a recorder (the server installs a Prometheus exporter).
//!
//! # Exported Metrics
//!
//! ## Counters
//! - `train_ticket_purchases_total{section}` - Tickets sold per section
//! - `train_ticket_removals_total{outcome}` - Removal requests (`removed`, `not_found`)
//! - `train_ticket_seat_modifications_total` - Successful seat changes
//! - `train_ticket_rejections_total{reason}` - Failed operations by error reason
//!
//! ## Gauges
//! - `train_ticket_active_tickets` - Live tickets
//! - `train_ticket_seats_available{section}` - Available seats per section

use crate::error::LedgerError;
use crate::state::Occupancy;
use crate::types::Section;
use metrics::{describe_counter, describe_gauge};

/// Register descriptions for all ledger metrics.
///
/// Call once at startup, after the recorder is installed.
pub fn register_ledger_metrics() {
    describe_counter!(
        "train_ticket_purchases_total",
        "Total number of tickets sold, by section"
    );
    describe_counter!(
        "train_ticket_removals_total",
        "Total number of removal requests, by outcome (removed, not_found)"
    );
    describe_counter!(
        "train_ticket_seat_modifications_total",
        "Total number of successful seat modifications"
    );
    describe_counter!(
        "train_ticket_rejections_total",
        "Total number of rejected ledger operations, by reason"
    );
    describe_gauge!("train_ticket_active_tickets", "Current number of live tickets");
    describe_gauge!(
        "train_ticket_seats_available",
        "Current number of available seats, by section"
    );

    tracing::info!("Ledger metrics registered");
}

pub(crate) fn record_purchase(section: &Section) {
    metrics::counter!("train_ticket_purchases_total", "section" => section.to_string())
        .increment(1);
}

pub(crate) fn record_removal(removed: bool) {
    let outcome = if removed { "removed" } else { "not_found" };
    metrics::counter!("train_ticket_removals_total", "outcome" => outcome).increment(1);
}

pub(crate) fn record_seat_modified() {
    metrics::counter!("train_ticket_seat_modifications_total").increment(1);
}

pub(crate) fn record_rejection(error: &LedgerError) {
    metrics::counter!("train_ticket_rejections_total", "reason" => error.reason()).increment(1);
}

#[allow(clippy::cast_precision_loss)]
pub(crate) fn update_occupancy(occupancy: &Occupancy) {
    metrics::gauge!("train_ticket_active_tickets").set(occupancy.active_tickets as f64);
    for (section, available) in &occupancy.seats_available {
        metrics::gauge!("train_ticket_seats_available", "section" => section.to_string())
            .set(*available as f64);
    }
}
