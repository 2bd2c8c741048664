//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Performs business logic (store access, validation)
//! 3. Returns HTTP response (JSON, status code)

/// Account directory endpoints
pub mod auth;
/// Booking ledger and draft wizard endpoints
pub mod bookings;
/// Flight catalog endpoints
pub mod flights;
/// Service health endpoint
pub mod health;
