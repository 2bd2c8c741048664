//! Bearer-token middleware for the profile route.
//!
//! Tokens are opaque base64 strings issued at login/signup, not signed
//! claims, so "verification" here means: the token decodes, and it names
//! a user that exists in the directory with the same email. This
//! middleware guards only `GET /auth/me`; the rest of the API does not
//! look at tokens at all.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, services::auth_service, store::AppState};

/// Authentication context attached to token-checked requests.
///
/// Inserted into the request's extension map; handlers behind this
/// middleware extract it with `Extension<AuthContext>`.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Id of the user the token names
    pub user_id: Uuid,

    /// Email carried in the token
    pub email: String,
}

/// Token-checking middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <token>` header from request
/// 2. Decode the token into `(user_id, email)`
/// 3. Look the user up in the directory and compare emails
/// 4. If it all lines up: inject `AuthContext`, call next handler
/// 5. Otherwise: return 401 Unauthorized
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::InvalidToken)?;

    // Expected format: "Bearer <token>"
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidToken)?;

    let (user_id, email) = auth_service::decode_token(token).ok_or(AppError::InvalidToken)?;

    // The token is unsigned, so the directory is the only check we have
    let user = state.store.user(user_id).ok_or(AppError::InvalidToken)?;
    if user.email != email {
        return Err(AppError::InvalidToken);
    }

    request.extensions_mut().insert(AuthContext { user_id, email });

    Ok(next.run(request).await)
}
