//! Flight catalog models and seat map types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A flight record in the catalog.
///
/// Flights are seeded once at process start and immutable thereafter;
/// there is no create/update/delete surface for the catalog.
///
/// # Field Notes
///
/// - `departure_time` / `arrival_time` carry no time zone and are kept as
///   the schedule strings the catalog was seeded with (e.g.
///   `"2024-12-20T10:00:00"`), like `duration` (e.g. `"7h 30m"`).
/// - `available_seats <= total_seats` holds for the seed data but is not
///   re-checked on booking; bookings never decrement it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Flight {
    /// Catalog key, e.g. "FL001"
    pub id: String,

    /// Operating airline name
    pub airline: String,

    /// Public flight number, e.g. "SA-101"
    pub flight_number: String,

    /// Origin airport, e.g. "New York (JFK)"
    pub from: String,

    /// Destination airport, e.g. "London (LHR)"
    pub to: String,

    /// Scheduled departure, local time without zone
    pub departure_time: String,

    /// Scheduled arrival, local time without zone
    pub arrival_time: String,

    /// Display duration, e.g. "7h 30m"
    pub duration: String,

    /// Ticket price per passenger
    pub price: f64,

    /// Seats still advertised as available
    pub available_seats: u32,

    /// Total cabin capacity
    pub total_seats: u32,
}

/// Query parameters for `GET /flights`.
///
/// Both filters are case-insensitive substring matches; an absent filter
/// matches everything.
#[derive(Debug, Deserialize)]
pub struct FlightQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Status of a single seat in a flight's seat map.
///
/// "selected" is a client-local display state and never appears on the
/// wire from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Occupied,
}

/// Response body for `GET /flights/{id}/seats`.
///
/// # JSON Example
///
/// ```json
/// {
///   "flightId": "FL001",
///   "rows": 30,
///   "seats": {
///     "1A": "available",
///     "1B": "occupied"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapResponse {
    /// Flight the map belongs to
    pub flight_id: String,

    /// Number of rows in the cabin
    pub rows: u32,

    /// Seat code ("1A".."30F") to status
    pub seats: BTreeMap<String, SeatStatus>,
}
