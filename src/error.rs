//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
/// Every failure is terminal for the request: there is no retry policy and
/// no distinction between transient and permanent failure.
///
/// # Error Categories
///
/// - **Validation Errors**: Missing or invalid request data
/// - **Authentication Errors**: Bad credentials or undecodable tokens
/// - **Resource Errors**: Flights, bookings, or drafts that do not exist
/// - **Internal Errors**: Anything unexpected, hidden behind a generic 500
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more required request fields are absent or empty.
    ///
    /// Returns HTTP 400 Bad Request with a static message, e.g.
    /// "Email and password are required".
    #[error("{0}")]
    MissingFields(&'static str),

    /// Login failed. The message is deliberately identical whether the
    /// email is unknown or the password mismatches, so the response does
    /// not leak which one it was.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bearer token is missing, undecodable, or names an unknown user.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid or missing token")]
    InvalidToken,

    /// Registration attempted with an email already in the directory.
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("User already exists")]
    UserExists,

    /// Requested flight does not exist in the catalog.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Flight not found")]
    FlightNotFound,

    /// No booking stored under the requested reference.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Booking not found")]
    BookingNotFound,

    /// No booking draft stored under the requested id.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Booking draft not found")]
    DraftNotFound,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("{0}")]
    InvalidRequest(String),

    /// Unexpected internal failure.
    ///
    /// Returns HTTP 500 with a generic body; the underlying error is
    /// logged server-side and never sent to the client.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::MissingFields(msg) => {
                (StatusCode::BAD_REQUEST, "missing_fields", msg.to_string())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "invalid_token", self.to_string())
            }
            AppError::UserExists => (StatusCode::BAD_REQUEST, "user_exists", self.to_string()),
            AppError::FlightNotFound => {
                (StatusCode::NOT_FOUND, "flight_not_found", self.to_string())
            }
            AppError::BookingNotFound => {
                (StatusCode::NOT_FOUND, "booking_not_found", self.to_string())
            }
            AppError::DraftNotFound => {
                (StatusCode::NOT_FOUND, "draft_not_found", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Internal(ref err) => {
                tracing::error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
