//! Health check endpoints.
//!
//! Used by load balancers and orchestrators to verify service health.

use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use train_ticket_core::SectionAvailability;

/// Health check response.
#[derive(Debug, Deserialize, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Liveness: 200 while the process is serving.
///
/// ```bash
/// curl http://localhost:50051/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Readiness check response.
#[derive(Debug, Deserialize, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness
    pub ready: bool,
    /// Live tickets held by the ledger
    pub active_tickets: usize,
    /// Seats still for sale
    pub seats_available: usize,
}

/// Readiness: 200 once the ledger answers under its lock.
///
/// A sold-out train is still ready; it just rejects purchases.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let (active_tickets, seats_available) = state
        .ledger
        .state(|ledger| {
            let seats: usize = ledger
                .availability()
                .iter()
                .map(SectionAvailability::available)
                .sum();
            (ledger.ticket_count(), seats)
        })
        .await;

    (
        StatusCode::OK,
        Json(ReadinessResponse {
            ready: true,
            active_tickets,
            seats_available,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn test_readiness_reports_ledger_counts() {
        let (status, Json(body)) = readiness_check(State(AppState::default())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ready);
        assert_eq!(body.active_tickets, 0);
        assert_eq!(body.seats_available, 20);
    }
}
