//! Router configuration.

use crate::handlers::{health, sections, tickets};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// Health checks live at the root; ledger operations under `/api`. Every
/// request passes through the correlation ID and HTTP trace layers.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/tickets", post(tickets::purchase_ticket))
        .route(
            "/tickets/:ticket_number",
            get(tickets::get_receipt).delete(tickets::remove_user),
        )
        .route("/tickets/:ticket_number/seat", put(tickets::modify_seat))
        .route("/sections", get(sections::get_availability))
        .route(
            "/sections/:section/tickets",
            get(sections::list_section_tickets),
        );

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
