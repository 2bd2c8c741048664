//! Booking ledger HTTP handlers.
//!
//! This module implements the booking API endpoints:
//! - POST /bookings - Direct one-shot booking creation
//! - GET /bookings?reference= - Lookup by reference, or full listing
//! - POST /bookings/draft - Start a booking wizard
//! - PATCH /bookings/draft/{id} - Apply a wizard step
//! - POST /bookings/draft/{id}/submit - Turn the draft into a booking

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::booking::{
        Booking, BookingDraft, BookingQuery, CreateBookingRequest, CreateDraftRequest,
        UpdateDraftRequest,
    },
    services::booking_service,
    store::AppState,
};

/// Create a booking in one request.
///
/// # Endpoint
///
/// `POST /bookings`
///
/// # Request Body
///
/// ```json
/// {
///   "flightId": "FL001",
///   "passengers": [{ "name": "A", "email": "a@x.com" }],
///   "seats": ["1A"],
///   "totalPrice": 450
/// }
/// ```
///
/// All four fields must be present and non-empty; nothing else is
/// validated on this path — the flight id is not checked against the
/// catalog and seat count may differ from passenger count. Payment is
/// simulated: the stored record is always "completed".
///
/// # Response
///
/// - **Success (201 Created)**: the stored booking, reference `SK` + six digits
/// - **Error (400)**: "Missing required fields"
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let total_price = match request.total_price {
        Some(price) => price,
        None => return Err(AppError::MissingFields("Missing required fields")),
    };
    if request.flight_id.is_empty() || request.passengers.is_empty() || request.seats.is_empty() {
        return Err(AppError::MissingFields("Missing required fields"));
    }

    let booking = booking_service::create_booking(
        &state.store,
        request.flight_id,
        request.passengers,
        request.seats,
        total_price,
    )?;

    tracing::info!(reference = %booking.booking_reference, "booking created");

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Look up a booking by reference, or list all bookings.
///
/// # Endpoint
///
/// `GET /bookings?reference=SK123456`
///
/// # Response
///
/// - **With `reference`, found (200 OK)**: the single booking object
/// - **With `reference`, absent (404)**: booking not found
/// - **Without `reference` (200 OK)**: array of all bookings
pub async fn get_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingQuery>,
) -> Result<Response, AppError> {
    if let Some(reference) = query.reference {
        let booking = state
            .store
            .booking(&reference)
            .ok_or(AppError::BookingNotFound)?;
        return Ok(Json(booking).into_response());
    }

    Ok(Json(state.store.bookings()).into_response())
}

/// Start a booking wizard.
///
/// # Endpoint
///
/// `POST /bookings/draft`
///
/// The server holds the wizard state from here on; the client only keeps
/// the returned draft id.
///
/// # Response
///
/// - **Success (201 Created)**: the empty draft
/// - **Error (400)**: Missing flight id
/// - **Error (404)**: Unknown flight
pub async fn create_draft(
    State(state): State<AppState>,
    Json(request): Json<CreateDraftRequest>,
) -> Result<(StatusCode, Json<BookingDraft>), AppError> {
    if request.flight_id.is_empty() {
        return Err(AppError::MissingFields("Flight id is required"));
    }

    let draft = booking_service::create_draft(&state.store, request.flight_id)?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// Apply one wizard step (passengers and/or seats) to a draft.
///
/// # Endpoint
///
/// `PATCH /bookings/draft/{id}`
///
/// # Response
///
/// - **Success (200 OK)**: the updated draft
/// - **Error (404)**: Unknown draft id
pub async fn update_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDraftRequest>,
) -> Result<Json<BookingDraft>, AppError> {
    let draft =
        booking_service::update_draft(&state.store, id, request.passengers, request.seats)?;
    Ok(Json(draft))
}

/// Submit a completed draft as a booking.
///
/// # Endpoint
///
/// `POST /bookings/draft/{id}/submit`
///
/// Validates the wizard state (at least one passenger, one seat per
/// passenger), prices the booking from the catalog server-side, and
/// deletes the draft once the booking is stored.
///
/// # Response
///
/// - **Success (201 Created)**: the stored booking
/// - **Error (400)**: Incomplete wizard state
/// - **Error (404)**: Unknown draft id
pub async fn submit_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = booking_service::submit_draft(&state.store, id)?;

    tracing::info!(reference = %booking.booking_reference, "draft submitted");

    Ok((StatusCode::CREATED, Json(booking)))
}
