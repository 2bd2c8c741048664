//! Account directory logic: registration, credential checks, and tokens.
//!
//! None of this is real security, on purpose. Passwords are obfuscated
//! with plain base64 rather than hashed, and tokens are base64 of
//! `"{id}:{email}:{epoch_millis}"` rather than signed claims. The only
//! guarantee the token gives is that it round-trips through
//! [`decode_token`]; it cannot be verified against anything.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::Utc;
use uuid::Uuid;

use crate::{error::AppError, models::user::User, store::Store};

/// Obfuscate a password for storage.
///
/// Base64, not a hash: reversible by anyone holding the stored value.
pub fn obfuscate_password(password: &str) -> String {
    BASE64.encode(password)
}

/// Check a plaintext password against its stored obfuscated form.
pub fn verify_password(password: &str, stored: &str) -> bool {
    obfuscate_password(password) == stored
}

/// Issue an opaque token for a user.
pub fn issue_token(user: &User) -> String {
    let claims = format!(
        "{}:{}:{}",
        user.id,
        user.email,
        Utc::now().timestamp_millis()
    );
    BASE64.encode(claims)
}

/// Decode a token back into `(user_id, email)`.
///
/// Returns `None` for anything that is not base64 of the expected
/// three-part shape. No signature check exists or can exist.
pub fn decode_token(token: &str) -> Option<(Uuid, String)> {
    let bytes = BASE64.decode(token).ok()?;
    let claims = String::from_utf8(bytes).ok()?;

    let mut parts = claims.splitn(3, ':');
    let user_id = parts.next()?.parse::<Uuid>().ok()?;
    let email = parts.next()?.to_string();
    parts.next()?;

    Some((user_id, email))
}

/// Register a new user.
///
/// Fails with [`AppError::UserExists`] when the email is already in the
/// directory. Returns the stored record (the password field carries the
/// obfuscated form and is skipped on serialization).
pub fn register_user(
    store: &Store,
    email: String,
    password: String,
    name: String,
) -> Result<User, AppError> {
    let user = User {
        id: Uuid::new_v4(),
        email,
        name,
        password: obfuscate_password(&password),
        created_at: Utc::now(),
    };

    if !store.insert_user_unique(user.clone()) {
        return Err(AppError::UserExists);
    }

    Ok(user)
}

/// Check credentials and return the matching user.
///
/// Unknown email and wrong password both yield the same
/// [`AppError::InvalidCredentials`], so the response never leaks which
/// half of the pair was wrong.
pub fn login_user(store: &Store, email: &str, password: &str) -> Result<User, AppError> {
    let user = store
        .find_user_by_email(email)
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(password, &user.password) {
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_obfuscation_round_trips() {
        let stored = obfuscate_password("pw123");
        assert_eq!(stored, "cHcxMjM=");
        assert!(verify_password("pw123", &stored));
        assert!(!verify_password("pw124", &stored));
    }

    #[test]
    fn token_round_trips_id_and_email() {
        let store = Store::new();
        let user = register_user(
            &store,
            "alice@example.com".to_string(),
            "pw123".to_string(),
            "Alice".to_string(),
        )
        .unwrap();

        let token = issue_token(&user);
        let (id, email) = decode_token(&token).unwrap();
        assert_eq!(id, user.id);
        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn garbage_tokens_decode_to_none() {
        assert!(decode_token("not base64 at all!").is_none());
        // Valid base64 but not the expected claim shape
        assert!(decode_token(&BASE64.encode("hello")).is_none());
        assert!(decode_token(&BASE64.encode("a:b")).is_none());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let store = Store::new();
        register_user(
            &store,
            "alice@example.com".to_string(),
            "pw123".to_string(),
            "Alice".to_string(),
        )
        .unwrap();

        let err = register_user(
            &store,
            "alice@example.com".to_string(),
            "other".to_string(),
            "Alice Again".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::UserExists));
    }

    #[test]
    fn login_failure_is_uniform() {
        let store = Store::new();
        register_user(
            &store,
            "alice@example.com".to_string(),
            "pw123".to_string(),
            "Alice".to_string(),
        )
        .unwrap();

        let wrong_password = login_user(&store, "alice@example.com", "nope").unwrap_err();
        let unknown_email = login_user(&store, "bob@example.com", "pw123").unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));

        assert!(login_user(&store, "alice@example.com", "pw123").is_ok());
    }
}
