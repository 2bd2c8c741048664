//! Account directory HTTP handlers.
//!
//! This module implements the auth-related API endpoints:
//! - POST /auth/signup - Register and receive a token (201)
//! - POST /auth/register - Register without a token (200)
//! - POST /auth/login - Credential check, token issue
//! - GET /auth/me - Profile of the token holder (the only token-checked route)

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    error::AppError,
    middleware::auth::AuthContext,
    models::user::{AuthResponse, LoginRequest, RegisteredResponse, SignupRequest, User},
    services::auth_service,
    store::AppState,
};

/// Register a new user and issue a token.
///
/// # Endpoint
///
/// `POST /auth/signup`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: `{user, token}`, user sans password
/// - **Error (400)**: Missing fields, or the email is already registered
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::MissingFields(
            "Name, email, and password are required",
        ));
    }

    let user =
        auth_service::register_user(&state.store, request.email, request.password, request.name)?;
    let token = auth_service::issue_token(&user);

    tracing::info!(email = %user.email, "user signed up");

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Register a new user without issuing a token.
///
/// # Endpoint
///
/// `POST /auth/register`
///
/// Same directory and same duplicate-email rule as signup, but the
/// response is the bare stored identity `{id, email, name}` at 200.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<Json<RegisteredResponse>, AppError> {
    if request.email.is_empty() || request.password.is_empty() || request.name.is_empty() {
        return Err(AppError::MissingFields("Missing required fields"));
    }

    let user =
        auth_service::register_user(&state.store, request.email, request.password, request.name)?;

    Ok(Json(user.into()))
}

/// Check credentials and issue a token.
///
/// # Endpoint
///
/// `POST /auth/login`
///
/// # Response
///
/// - **Success (200 OK)**: `{user, token}`, user sans password
/// - **Error (400)**: Missing fields
/// - **Error (401)**: "Invalid email or password" — identical for an
///   unknown email and a wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::MissingFields("Email and password are required"));
    }

    let user = auth_service::login_user(&state.store, &request.email, &request.password)?;
    let token = auth_service::issue_token(&user);

    Ok(Json(AuthResponse { user, token }))
}

/// Profile of the authenticated user.
///
/// # Endpoint
///
/// `GET /auth/me`
///
/// The auth middleware has already decoded the token and checked the
/// directory; this handler only re-fetches the record.
///
/// # Response
///
/// - **Success (200 OK)**: user sans password
/// - **Error (401)**: Missing or undecodable token, or unknown user
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<User>, AppError> {
    let user = state.store.user(auth.user_id).ok_or(AppError::InvalidToken)?;

    tracing::debug!(email = %auth.email, "profile fetched");

    Ok(Json(user))
}
