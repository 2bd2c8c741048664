//! Flight catalog HTTP handlers.
//!
//! This module implements the catalog API endpoints:
//! - GET /flights - List/search flights
//! - GET /flights/{id}/seats - Seat map for one flight
//!
//! The catalog has no create/update/delete surface; it is seeded at
//! startup and immutable.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    error::AppError,
    models::flight::{Flight, FlightQuery, SeatMapResponse},
    services::seat_service,
    store::AppState,
};

/// List flights, optionally filtered by origin and destination.
///
/// # Endpoint
///
/// `GET /flights?from=&to=`
///
/// Both filters are case-insensitive substring matches ("london" matches
/// "London (LHR)"). No pagination and no sorting beyond catalog order.
///
/// # Response
///
/// - **Success (200 OK)**: array of matching flights, possibly empty
pub async fn list_flights(
    State(state): State<AppState>,
    Query(query): Query<FlightQuery>,
) -> Json<Vec<Flight>> {
    let mut results = state.store.flights();

    if let Some(from) = &query.from {
        let needle = from.to_lowercase();
        results.retain(|f| f.from.to_lowercase().contains(&needle));
    }

    if let Some(to) = &query.to {
        let needle = to.to_lowercase();
        results.retain(|f| f.to.to_lowercase().contains(&needle));
    }

    Json(results)
}

/// Seat map for one flight.
///
/// # Endpoint
///
/// `GET /flights/{id}/seats`
///
/// The map is derived, not stored: a simulation seeded by the flight id,
/// with seats from confirmed bookings overlaid as occupied. The same
/// flight always yields the same base map.
///
/// # Response
///
/// - **Success (200 OK)**: `{flightId, rows, seats}` with seat codes
///   mapped to "available"/"occupied"
/// - **Error (404)**: Unknown flight id
pub async fn seat_map(
    State(state): State<AppState>,
    Path(flight_id): Path<String>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let map = seat_service::seat_map(&state.store, &flight_id, state.config.seat_rows)?;
    Ok(Json(map))
}
