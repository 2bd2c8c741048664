//! User data models and API request/response types.
//!
//! This module defines:
//! - `User`: Account directory entity
//! - `SignupRequest` / `LoginRequest`: Request bodies for the auth endpoints
//! - `RegisteredResponse` / `AuthResponse`: Response bodies returned to clients

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record in the account directory.
///
/// Users are created on registration and never updated or deleted.
///
/// # Password Storage
///
/// The `password` field holds a base64-obfuscated copy of the plaintext,
/// NOT a cryptographic hash. This mirrors the demo-grade auth the service
/// exposes and must never be treated as real password storage.
///
/// The field is skipped during serialization, so every response that
/// embeds a `User` is automatically "user sans password".
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for this user
    pub id: Uuid,

    /// Email address, unique across the directory
    pub email: String,

    /// Display name
    pub name: String,

    /// Base64-obfuscated password, never serialized
    #[serde(skip_serializing)]
    pub password: String,

    /// Timestamp when the user registered
    pub created_at: DateTime<Utc>,
}

/// Request body for `POST /auth/signup` and `POST /auth/register`.
///
/// All fields default to empty strings so that an absent field and an
/// empty field fail the same presence check with the same 400 message.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "pw123"
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

/// Response body for `POST /auth/register`.
///
/// The register endpoint returns only the stored identity, no token.
#[derive(Debug, Serialize)]
pub struct RegisteredResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for RegisteredResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Response body for `POST /auth/login` and `POST /auth/signup`.
///
/// # JSON Example
///
/// ```json
/// {
///   "user": {
///     "id": "550e8400-e29b-41d4-a716-446655440000",
///     "email": "alice@example.com",
///     "name": "Alice",
///     "createdAt": "2026-08-23T10:00:00Z"
///   },
///   "token": "NTUwZTg0MDAt..."
/// }
/// ```
///
/// The token is an opaque base64 string, not a verifiable signature; no
/// endpoint other than `GET /auth/me` ever inspects it.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}
