//! HTTP middleware.
//!
//! Only the profile route is behind middleware; every other endpoint is
//! deliberately unauthenticated.

/// Bearer-token middleware
pub mod auth;
