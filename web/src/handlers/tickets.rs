//! Ticket endpoints.
//!
//! - POST /api/tickets - Purchase a ticket
//! - GET /api/tickets/:ticket_number - Receipt for a live ticket
//! - DELETE /api/tickets/:ticket_number - Remove a passenger
//! - PUT /api/tickets/:ticket_number/seat - Move a ticket to another section

use crate::{WebResult, middleware::CorrelationId, state::AppState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use train_ticket_core::{Passenger, SeatLabel, Section, Ticket, TicketNumber};

// ============================================================================
// Request / Response Types
// ============================================================================

/// Request body for a purchase.
#[derive(Debug, Deserialize, Serialize)]
pub struct PurchaseTicketRequest {
    /// Origin station
    pub from: String,
    /// Destination station
    pub to: String,
    /// Passenger details
    pub user: Passenger,
}

/// Response for a successful purchase.
#[derive(Debug, Deserialize, Serialize)]
pub struct PurchaseTicketResponse {
    /// Newly issued ticket number
    pub ticket_number: TicketNumber,
    /// Assigned seat
    pub seat_number: SeatLabel,
    /// Section of the assigned seat
    pub section: Section,
    /// Amount charged
    pub price_paid: f32,
    /// Confirmation message
    pub message: String,
}

/// Response for a receipt lookup.
#[derive(Debug, Deserialize, Serialize)]
pub struct ReceiptResponse {
    /// The live ticket
    pub ticket: Ticket,
}

/// Request body for a seat change.
///
/// The requested seat label is accepted but the ledger always assigns the
/// head seat of the destination section.
#[derive(Debug, Deserialize, Serialize)]
pub struct ModifySeatRequest {
    /// Seat the caller would like (advisory)
    #[serde(default)]
    pub new_seat_number: Option<String>,
    /// Destination section
    pub new_section: String,
}

/// Response carrying only a confirmation message.
#[derive(Debug, Deserialize, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Purchase a ticket.
///
/// ```bash
/// curl -X POST http://localhost:50051/api/tickets \
///   -H 'content-type: application/json' \
///   -d '{"from":"London","to":"France","user":{"first_name":"Alice","last_name":"Doe","email":"alice@example.com"}}'
/// ```
///
/// Response (201):
/// ```json
/// {"ticket_number":1,"seat_number":"1A","section":"A","price_paid":20.0,"message":"Ticket purchased successfully!"}
/// ```
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0))]
pub async fn purchase_ticket(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Json(request): Json<PurchaseTicketRequest>,
) -> WebResult<(StatusCode, Json<PurchaseTicketResponse>)> {
    let receipt = state
        .ledger
        .purchase(request.from, request.to, request.user)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseTicketResponse {
            message: receipt.message().to_string(),
            ticket_number: receipt.ticket_number,
            seat_number: receipt.seat_number,
            section: receipt.section,
            price_paid: receipt.price_paid,
        }),
    ))
}

/// Receipt for a live ticket; 404 if unknown or removed.
pub async fn get_receipt(
    State(state): State<AppState>,
    Path(ticket_number): Path<i32>,
) -> WebResult<Json<ReceiptResponse>> {
    let ticket = state.ledger.receipt(TicketNumber::new(ticket_number)).await?;
    Ok(Json(ReceiptResponse { ticket }))
}

/// Remove a passenger's ticket.
///
/// Always 200: an unknown ticket is reported in the message, not as an error.
pub async fn remove_user(
    State(state): State<AppState>,
    Path(ticket_number): Path<i32>,
) -> Json<MessageResponse> {
    let removal = state.ledger.remove(TicketNumber::new(ticket_number)).await;
    Json(MessageResponse {
        message: removal.message().to_string(),
    })
}

/// Move a ticket to the head seat of another section.
pub async fn modify_seat(
    State(state): State<AppState>,
    Path(ticket_number): Path<i32>,
    Json(request): Json<ModifySeatRequest>,
) -> WebResult<Json<MessageResponse>> {
    let change = state
        .ledger
        .modify_seat(TicketNumber::new(ticket_number), request.new_section)
        .await?;

    if let Some(requested) = request
        .new_seat_number
        .filter(|requested| requested != change.seat_number.as_str())
    {
        tracing::debug!(
            %requested,
            assigned = %change.seat_number,
            "Requested seat ignored"
        );
    }

    Ok(Json(MessageResponse {
        message: change.message().to_string(),
    }))
}
