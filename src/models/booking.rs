//! Booking ledger models, the draft wizard entity, and their API types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One passenger on a booking.
///
/// `passport` is optional on the wire and omitted from responses when
/// absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
}

/// A completed booking in the ledger.
///
/// The booking reference doubles as the storage key and as the
/// human-shown confirmation code. Bookings are created once, never
/// updated or deleted, and lost on restart.
///
/// `seats.len()` is expected to equal `passengers.len()` but is NOT
/// enforced on the direct `POST /bookings` path; only the draft wizard's
/// submit step validates it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Same value as `booking_reference`
    pub id: String,

    /// Ledger key, format `SK` + six digits
    pub booking_reference: String,

    /// Flight the booking is for (existence is not re-checked)
    pub flight_id: String,

    /// Travelling passengers
    pub passengers: Vec<Passenger>,

    /// Selected seat codes, e.g. ["1A", "1B"]
    pub seats: Vec<String>,

    /// Total charged price
    pub total_price: f64,

    /// Timestamp when the booking was stored
    pub booking_date: DateTime<Utc>,

    /// Always "completed"; there is no real payment gateway behind this
    pub payment_status: String,
}

/// Request body for `POST /bookings`.
///
/// Collection fields default to empty so an absent field and an empty
/// field fail the same presence check.
///
/// # JSON Example
///
/// ```json
/// {
///   "flightId": "FL001",
///   "passengers": [{ "name": "A", "email": "a@x.com" }],
///   "seats": ["1A"],
///   "totalPrice": 450
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    pub flight_id: String,

    #[serde(default)]
    pub passengers: Vec<Passenger>,

    #[serde(default)]
    pub seats: Vec<String>,

    pub total_price: Option<f64>,
}

/// Query parameters for `GET /bookings`.
#[derive(Debug, Deserialize)]
pub struct BookingQuery {
    pub reference: Option<String>,
}

/// Server-held state for an in-progress booking wizard.
///
/// Replaces client-local storage between the passenger, seat, and payment
/// steps: the client addresses the draft by its opaque id instead of
/// shipping intermediate state back up. Drafts are deleted on submit and
/// lost on restart like everything else.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    /// Opaque wizard session id
    pub id: Uuid,

    /// Flight being booked, validated at draft creation
    pub flight_id: String,

    /// Passenger step state, empty until filled in
    pub passengers: Vec<Passenger>,

    /// Seat step state, empty until filled in
    pub seats: Vec<String>,

    /// Timestamp when the wizard started
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last step update
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /bookings/draft`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    #[serde(default)]
    pub flight_id: String,
}

/// Request body for `PATCH /bookings/draft/{id}`.
///
/// Each wizard step sends only the fields it owns; absent fields are
/// left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateDraftRequest {
    pub passengers: Option<Vec<Passenger>>,
    pub seats: Option<Vec<String>>,
}
