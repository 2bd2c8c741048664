//! Data models representing the in-memory ledgers.
//!
//! This module contains all entity structures plus the API request and
//! response types that travel over the wire. Wire field names are camelCase
//! (`flightId`, `totalPrice`) to match the public JSON contract.

/// Booking ledger entities and the draft wizard
pub mod booking;
/// Flight catalog entities and seat maps
pub mod flight;
/// Account directory entities
pub mod user;
