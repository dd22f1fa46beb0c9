#![allow(dead_code)]

use axum::http::{header, HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;
use ecomm::{
    api::routes::create_app,
    types::{Role, User},
    AppState, EcommConfig,
};
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

/// State backed by in-memory stores and the cheapest bcrypt cost.
pub async fn create_test_state() -> AppState {
    let mut config = EcommConfig::default();
    config.database.documents = ":memory:".to_string();
    config.database.catalog = ":memory:".to_string();
    config.auth.hash_cost = 4;

    AppState::build(config, TEST_SECRET)
        .await
        .expect("Failed to build test state")
}

pub async fn create_test_server() -> (TestServer, AppState) {
    let state = create_test_state().await;
    let server =
        TestServer::new(create_app(state.clone())).expect("Failed to create test server");
    (server, state)
}

pub fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header"),
    )
}

/// Registers a customer and returns its id.
pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/users/register")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    body["user"]["id"].as_str().expect("user id").to_string()
}

pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/users/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().expect("token").to_string()
}

/// Registers and logs in a customer, returning `(id, token)`.
pub async fn customer(server: &TestServer, name: &str, email: &str) -> (String, String) {
    let id = register(server, name, email, "password").await;
    let token = login(server, email, "password").await;
    (id, token)
}

/// Seeds an administrator straight into the store (there is no endpoint
/// that grants the role) and logs it in, returning `(id, token)`.
pub async fn admin(server: &TestServer, state: &AppState) -> (String, String) {
    let now = Utc::now().timestamp();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: "Admin".to_string(),
        email: "admin@example.com".to_string(),
        password_hash: state.hasher.hash("admin-password").unwrap(),
        role: Role::Admin,
        is_active: true,
        is_verified: true,
        created_at: now,
        updated_at: now,
    };
    state.users.create_user(&user).await.unwrap();

    let token = login(server, "admin@example.com", "admin-password").await;
    (user.id, token)
}
