//! Booking ledger logic: reference assignment and draft submission.
//!
//! # Reference Assignment
//!
//! A booking reference is `SK` followed by the last six digits of the
//! epoch-millisecond clock at creation time. Two requests inside the same
//! millisecond would derive the same reference, so insertion goes through
//! [`Store::try_insert_booking`], which checks uniqueness under the write
//! lock; on collision the clock value is bumped and the reference
//! re-derived. A colliding booking therefore gets the next free reference
//! instead of overwriting the earlier one.

use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::booking::{Booking, BookingDraft, Passenger},
    store::Store,
};

/// Prefix of every booking reference.
pub const REFERENCE_PREFIX: &str = "SK";

/// References cycle through the last six digits of the millisecond clock.
const REFERENCE_SPACE: i64 = 1_000_000;

/// Derive a reference candidate from a clock value.
fn reference_from_millis(millis: i64) -> String {
    format!("{REFERENCE_PREFIX}{:06}", millis.rem_euclid(REFERENCE_SPACE))
}

/// Create and store a booking.
///
/// Field presence has already been validated by the handler; nothing here
/// re-checks that the flight exists or that seat and passenger counts
/// line up, matching the direct booking contract.
pub fn create_booking(
    store: &Store,
    flight_id: String,
    passengers: Vec<Passenger>,
    seats: Vec<String>,
    total_price: f64,
) -> Result<Booking, AppError> {
    create_booking_at(
        store,
        Utc::now().timestamp_millis(),
        flight_id,
        passengers,
        seats,
        total_price,
    )
}

/// Reference derivation and insertion, with the clock value injected.
///
/// Walks forward through the reference space until an unused reference is
/// found. The space holds one million references; exhausting it means the
/// ledger is full, which is reported as an internal error.
fn create_booking_at(
    store: &Store,
    millis: i64,
    flight_id: String,
    passengers: Vec<Passenger>,
    seats: Vec<String>,
    total_price: f64,
) -> Result<Booking, AppError> {
    let reference = reference_from_millis(millis);
    let mut booking = Booking {
        id: reference.clone(),
        booking_reference: reference,
        flight_id,
        passengers,
        seats,
        total_price,
        booking_date: Utc::now(),
        payment_status: "completed".to_string(),
    };

    for attempt in 1..=REFERENCE_SPACE {
        match store.try_insert_booking(booking) {
            Ok(stored) => return Ok(stored),
            Err(rejected) => {
                booking = rejected;
                let reference = reference_from_millis(millis + attempt);
                booking.id = reference.clone();
                booking.booking_reference = reference;
            }
        }
    }

    Err(AppError::Internal(anyhow!(
        "booking reference space exhausted"
    )))
}

/// Start a booking wizard for a flight.
///
/// The flight must exist; the draft starts with empty passenger and seat
/// steps.
pub fn create_draft(store: &Store, flight_id: String) -> Result<BookingDraft, AppError> {
    if store.flight(&flight_id).is_none() {
        return Err(AppError::FlightNotFound);
    }

    let now = Utc::now();
    let draft = BookingDraft {
        id: Uuid::new_v4(),
        flight_id,
        passengers: Vec::new(),
        seats: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    store.insert_draft(draft.clone());
    Ok(draft)
}

/// Apply one wizard step to a draft.
pub fn update_draft(
    store: &Store,
    id: Uuid,
    passengers: Option<Vec<Passenger>>,
    seats: Option<Vec<String>>,
) -> Result<BookingDraft, AppError> {
    store
        .update_draft(id, |draft| {
            if let Some(passengers) = passengers {
                draft.passengers = passengers;
            }
            if let Some(seats) = seats {
                draft.seats = seats;
            }
            draft.updated_at = Utc::now();
        })
        .ok_or(AppError::DraftNotFound)
}

/// Turn a completed draft into a booking.
///
/// Unlike the direct booking path, submission validates the wizard state:
/// at least one passenger, and exactly one seat per passenger. The total
/// price is computed server-side from the catalog price instead of being
/// trusted from the client. The draft is deleted only after the booking
/// is stored, so a failed submit leaves the wizard resumable.
pub fn submit_draft(store: &Store, id: Uuid) -> Result<Booking, AppError> {
    let draft = store.draft(id).ok_or(AppError::DraftNotFound)?;

    if draft.passengers.is_empty() {
        return Err(AppError::InvalidRequest(
            "Draft has no passengers".to_string(),
        ));
    }
    if draft.seats.len() != draft.passengers.len() {
        return Err(AppError::InvalidRequest(format!(
            "Selected {} seat(s) for {} passenger(s)",
            draft.seats.len(),
            draft.passengers.len()
        )));
    }

    let flight = store.flight(&draft.flight_id).ok_or(AppError::FlightNotFound)?;
    let total_price = flight.price * draft.passengers.len() as f64;

    let booking = create_booking(
        store,
        draft.flight_id,
        draft.passengers,
        draft.seats,
        total_price,
    )?;

    store.remove_draft(id);
    Ok(booking)
}
