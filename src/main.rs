//! SkyBooker - Main Application Entry Point
//!
//! This is a REST API server for a flight-booking demo: search flights,
//! inspect seat maps, assemble a booking through a server-held draft, and
//! register/login with opaque tokens. All state lives in process memory
//! and resets on restart.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: in-memory ledgers behind `parking_lot::RwLock`
//! - **Authentication**: demo-grade base64 tokens, checked on one route only
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Initialize tracing
//! 2. Load configuration from environment variables
//! 3. Seed the flight catalog
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod store;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::AppState;

/// Build the application router.
///
/// Factored out of `main` so router-level tests can drive the whole
/// service against a fresh in-memory store.
fn app(state: AppState) -> Router {
    // The profile route is the only one that looks at tokens
    let token_checked = Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        // Account directory
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/register", post(handlers::auth::register))
        // Flight catalog
        .route("/flights", get(handlers::flights::list_flights))
        .route("/flights/{id}/seats", get(handlers::flights::seat_map))
        // Booking ledger
        .route(
            "/bookings",
            get(handlers::bookings::get_bookings).post(handlers::bookings::create_booking),
        )
        // Booking wizard drafts
        .route("/bookings/draft", post(handlers::bookings::create_draft))
        .route(
            "/bookings/draft/{id}",
            patch(handlers::bookings::update_draft),
        )
        .route(
            "/bookings/draft/{id}/submit",
            post(handlers::bookings::submit_draft),
        )
        .merge(token_checked)
        // Request/response tracing for observability
        .layer(TraceLayer::new_for_http())
        // The API is consumed by a browser frontend
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Create and seed the in-memory store
    let store = Arc::new(store::Store::new());
    let seeded = store.seed_flights();
    tracing::info!("Flight catalog seeded with {} flights", seeded);

    let state = AppState {
        store,
        config: config.clone(),
    };

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, store::Store};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let store = Arc::new(Store::new());
        store.seed_flights();
        app(AppState {
            store,
            config: Config {
                server_port: 0,
                seat_rows: 30,
            },
        })
    }

    /// Drive one request through the router and decode the JSON body.
    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn error_message(body: &Value) -> &str {
        body["error"]["message"].as_str().unwrap_or_default()
    }

    #[tokio::test]
    async fn health_reports_ledger_sizes() {
        let app = test_app();
        let (status, body) = send(&app, "GET", "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["flights"], 3);
        assert_eq!(body["bookings"], 0);
        assert_eq!(body["users"], 0);
    }

    #[tokio::test]
    async fn signup_then_duplicate_registration_fails() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/auth/signup",
            Some(json!({"name": "Alice", "email": "alice@example.com", "password": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert_eq!(body["user"]["name"], "Alice");
        assert!(body["user"].get("password").is_none());
        assert!(body["token"].is_string());

        let (status, body) = send(
            &app,
            "POST",
            "/auth/signup",
            Some(json!({"name": "Alice", "email": "alice@example.com", "password": "other"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).contains("already exists"));
    }

    #[tokio::test]
    async fn register_returns_bare_identity() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/auth/register",
            Some(json!({"email": "bob@example.com", "password": "pw", "name": "Bob"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "bob@example.com");
        assert_eq!(body["name"], "Bob");
        assert!(body.get("password").is_none());
        assert!(body.get("token").is_none());

        // Register and signup share the directory
        let (status, body) = send(
            &app,
            "POST",
            "/auth/register",
            Some(json!({"email": "bob@example.com", "password": "pw", "name": "Bob"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).contains("already exists"));
    }

    #[tokio::test]
    async fn missing_auth_fields_are_a_400() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            Some(json!({"email": "alice@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Email and password are required");

        let (status, _) = send(
            &app,
            "POST",
            "/auth/signup",
            Some(json!({"name": "", "email": "a@x.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_failure_does_not_leak_which_half_was_wrong() {
        let app = test_app();
        send(
            &app,
            "POST",
            "/auth/signup",
            Some(json!({"name": "Alice", "email": "alice@example.com", "password": "pw123"})),
        )
        .await;

        let (wrong_pw_status, wrong_pw_body) = send(
            &app,
            "POST",
            "/auth/login",
            Some(json!({"email": "alice@example.com", "password": "nope"})),
        )
        .await;
        let (unknown_status, unknown_body) = send(
            &app,
            "POST",
            "/auth/login",
            Some(json!({"email": "nobody@example.com", "password": "pw123"})),
        )
        .await;

        assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
        assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
        assert_eq!(error_message(&wrong_pw_body), "Invalid email or password");
        assert_eq!(error_message(&wrong_pw_body), error_message(&unknown_body));

        let (status, body) = send(
            &app,
            "POST",
            "/auth/login",
            Some(json!({"email": "alice@example.com", "password": "pw123"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "alice@example.com");
    }

    #[tokio::test]
    async fn profile_requires_a_decodable_token() {
        let app = test_app();
        let (_, body) = send(
            &app,
            "POST",
            "/auth/signup",
            Some(json!({"name": "Alice", "email": "alice@example.com", "password": "pw123"})),
        )
        .await;
        let token = body["token"].as_str().unwrap().to_string();

        // No token
        let (status, _) = send(&app, "GET", "/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Garbage token
        let request = Request::builder()
            .method("GET")
            .uri("/auth/me")
            .header("Authorization", "Bearer not-a-token")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Issued token
        let request = Request::builder()
            .method("GET")
            .uri("/auth/me")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["email"], "alice@example.com");
        assert!(body.get("password").is_none());
    }

    #[tokio::test]
    async fn flight_search_filters_are_substring_and_case_insensitive() {
        let app = test_app();

        let (status, body) = send(&app, "GET", "/flights", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        // Every seeded flight departs New York, so an origin filter of
        // "London" matches nothing
        let (status, body) = send(&app, "GET", "/flights?from=London", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());

        let (_, body) = send(&app, "GET", "/flights?to=london", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (_, body) = send(&app, "GET", "/flights?from=jfk&to=LHR", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["id"], "FL001");
        assert_eq!(body[0]["flightNumber"], "SA-101");
        assert_eq!(body[0]["price"], 450.0);
    }

    #[tokio::test]
    async fn booking_creation_matches_the_reference_contract() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/bookings",
            Some(json!({
                "flightId": "FL001",
                "passengers": [{"name": "A", "email": "a@x.com"}],
                "seats": ["1A"],
                "totalPrice": 450
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["paymentStatus"], "completed");
        assert_eq!(body["flightId"], "FL001");
        assert_eq!(body["totalPrice"], 450.0);

        let reference = body["bookingReference"].as_str().unwrap();
        assert_eq!(body["id"], reference);
        assert_eq!(reference.len(), 8);
        assert!(reference.starts_with("SK"));
        assert!(reference[2..].chars().all(|c| c.is_ascii_digit()));

        // The stored record is retrievable by reference
        let (status, fetched) =
            send(&app, "GET", &format!("/bookings?reference={reference}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["bookingReference"], reference);
    }

    #[tokio::test]
    async fn booking_requires_all_four_fields() {
        let app = test_app();

        // Missing totalPrice
        let (status, body) = send(
            &app,
            "POST",
            "/bookings",
            Some(json!({
                "flightId": "FL001",
                "passengers": [{"name": "A", "email": "a@x.com"}],
                "seats": ["1A"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "Missing required fields");

        // Empty seats list counts as missing
        let (status, _) = send(
            &app,
            "POST",
            "/bookings",
            Some(json!({
                "flightId": "FL001",
                "passengers": [{"name": "A", "email": "a@x.com"}],
                "seats": [],
                "totalPrice": 450
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_reference_is_a_404_and_bare_listing_is_a_200() {
        let app = test_app();

        let (status, _) = send(&app, "GET", "/bookings?reference=SK000000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "GET", "/bookings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn seat_maps_are_stable_and_scoped_to_known_flights() {
        let app = test_app();

        let (status, first) = send(&app, "GET", "/flights/FL001/seats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["flightId"], "FL001");
        assert_eq!(first["rows"], 30);
        assert_eq!(first["seats"].as_object().unwrap().len(), 180);

        let (_, second) = send(&app, "GET", "/flights/FL001/seats", None).await;
        assert_eq!(first["seats"], second["seats"]);

        let (status, _) = send(&app, "GET", "/flights/FL999/seats", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn draft_wizard_runs_end_to_end() {
        let app = test_app();

        let (status, draft) = send(
            &app,
            "POST",
            "/bookings/draft",
            Some(json!({"flightId": "FL001"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let draft_id = draft["id"].as_str().unwrap().to_string();
        assert_eq!(draft["flightId"], "FL001");

        // Passenger step
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/bookings/draft/{draft_id}"),
            Some(json!({"passengers": [
                {"name": "A", "email": "a@x.com", "passport": "P1234567"},
                {"name": "B", "email": "b@x.com"}
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // Seat step
        let (status, updated) = send(
            &app,
            "PATCH",
            &format!("/bookings/draft/{draft_id}"),
            Some(json!({"seats": ["1A", "1B"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["passengers"].as_array().unwrap().len(), 2);
        assert_eq!(updated["seats"], json!(["1A", "1B"]));

        // Payment step: price is computed server-side (2 x 450.0)
        let (status, booking) = send(
            &app,
            "POST",
            &format!("/bookings/draft/{draft_id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(booking["totalPrice"], 900.0);
        assert_eq!(booking["paymentStatus"], "completed");
        assert_eq!(booking["passengers"][0]["passport"], "P1234567");

        // Booked seats show occupied on the seat map
        let (_, map) = send(&app, "GET", "/flights/FL001/seats", None).await;
        assert_eq!(map["seats"]["1A"], "occupied");
        assert_eq!(map["seats"]["1B"], "occupied");

        // The draft is gone
        let (status, _) = send(
            &app,
            "POST",
            &format!("/bookings/draft/{draft_id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn draft_wizard_rejects_bad_state() {
        let app = test_app();

        let (status, _) = send(
            &app,
            "POST",
            "/bookings/draft",
            Some(json!({"flightId": "FL999"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, draft) = send(
            &app,
            "POST",
            "/bookings/draft",
            Some(json!({"flightId": "FL002"})),
        )
        .await;
        let draft_id = draft["id"].as_str().unwrap().to_string();

        // Two passengers, one seat
        send(
            &app,
            "PATCH",
            &format!("/bookings/draft/{draft_id}"),
            Some(json!({
                "passengers": [
                    {"name": "A", "email": "a@x.com"},
                    {"name": "B", "email": "b@x.com"}
                ],
                "seats": ["1A"]
            })),
        )
        .await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/bookings/draft/{draft_id}/submit"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).contains("seat"));
    }
}
