//! Health check endpoint for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::AppState;

/// Health check response.
///
/// Reports ledger sizes alongside the status; with an in-memory store
/// there is no connectivity to probe.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Seeded flight count
    pub flights: usize,

    /// Bookings currently in the ledger
    pub bookings: usize,

    /// Registered users
    pub users: usize,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "flights": 3,
///   "bookings": 0,
///   "users": 0,
///   "timestamp": "2026-08-23T19:00:00Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (users, flights, bookings) = state.store.counts();

    Json(HealthResponse {
        status: "healthy".to_string(),
        flights,
        bookings,
        users,
        timestamp: Utc::now(),
    })
}
