//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers:
//! credential checks, booking-reference assignment, and seat map
//! derivation.

pub mod auth_service;
pub mod booking_service;
pub mod seat_service;
