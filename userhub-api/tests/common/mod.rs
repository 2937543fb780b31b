/// Common test utilities for integration tests
///
/// Each test gets its own migrated database from `#[sqlx::test]`; these
/// helpers build the router on top of that pool and drive it in-process.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use userhub_api::app::{build_router, AppState};
use userhub_api::config::{ApiConfig, Config, DatabaseConfig, PaginationConfig};

/// Configuration for tests; the database URL is unused because the pool is
/// supplied directly
pub fn test_config(total_on_page: u64) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 5,
        },
        pagination: PaginationConfig { total_on_page },
    }
}

/// Builds the full router over a test pool
pub fn test_app(pool: PgPool, total_on_page: u64) -> Router {
    build_router(AppState::new(pool, test_config(total_on_page)))
}

/// Sends one request and returns the status with the parsed JSON body
///
/// An empty body comes back as `Value::Null`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    send_request(app, builder.body(body).unwrap()).await
}

/// Sends a prepared request and returns the status with the parsed JSON body
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|e| panic!("non-JSON body ({}): {}", e, String::from_utf8_lossy(&bytes)))
    };

    (status, body)
}

/// Request body for a valid user
pub fn user_body(username: &str, locations: &[&str]) -> Value {
    json!({
        "username": username,
        "first_name": "First",
        "last_name": "Last",
        "role": "member",
        "password": "secret",
        "age": 20,
        "location": locations,
    })
}

/// Creates a user through the API and returns the response body
pub async fn create_user(app: &Router, username: &str, locations: &[&str]) -> Value {
    let (status, body) = send(app, "POST", "/users/", Some(user_body(username, locations))).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}
