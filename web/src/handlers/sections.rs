//! Section endpoints.
//!
//! - GET /api/sections - Availability of every section
//! - GET /api/sections/:section/tickets - Live tickets seated in a section

use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use train_ticket_core::{SeatLabel, Section, Ticket};

/// Live tickets of one section.
#[derive(Debug, Deserialize, Serialize)]
pub struct SectionTicketsResponse {
    /// Tickets ordered by ticket number
    pub tickets: Vec<Ticket>,
}

/// Availability of one section.
#[derive(Debug, Deserialize, Serialize)]
pub struct SectionAvailabilityResponse {
    /// Section identifier
    pub section: Section,
    /// Number of free seats
    pub available: usize,
    /// Free seats, next to be sold first
    pub seats: Vec<SeatLabel>,
}

/// Availability across the train.
#[derive(Debug, Deserialize, Serialize)]
pub struct AvailabilityResponse {
    /// Sections in allocation priority order
    pub sections: Vec<SectionAvailabilityResponse>,
    /// Free seats across all sections
    pub total_available: usize,
}

/// List tickets in a section. Unknown sections yield an empty list.
pub async fn list_section_tickets(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Json<SectionTicketsResponse> {
    let tickets = state.ledger.tickets_in_section(&section).await;
    Json(SectionTicketsResponse { tickets })
}

/// Seat availability for all sections.
///
/// ```bash
/// curl http://localhost:50051/api/sections
/// ```
///
/// Response:
/// ```json
/// {
///   "sections": [
///     {"section": "A", "available": 9, "seats": ["1B", "1C", "..."]},
///     {"section": "B", "available": 10, "seats": ["2A", "2B", "..."]}
///   ],
///   "total_available": 19
/// }
/// ```
pub async fn get_availability(State(state): State<AppState>) -> Json<AvailabilityResponse> {
    let sections: Vec<SectionAvailabilityResponse> = state
        .ledger
        .availability()
        .await
        .into_iter()
        .map(|s| SectionAvailabilityResponse {
            available: s.available(),
            section: s.section,
            seats: s.seats,
        })
        .collect();

    let total_available = sections.iter().map(|s| s.available).sum();

    Json(AvailabilityResponse {
        sections,
        total_available,
    })
}
