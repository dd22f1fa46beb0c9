//! Integration tests for the TOML configuration system
//!
//! Configuration is loaded from a real file, validated, and used to build
//! a served application.

use axum_test::TestServer;
use ecomm::{api::routes::create_app, utils::toml_config::ConfigError, AppState, EcommConfig};
use serde_json::json;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[tokio::test]
async fn test_config_file_to_running_app() {
    std::env::set_var("ECOMM_IT_JWT_SECRET", "integration-secret");
    let data = TempDir::new().unwrap();
    let documents = data.path().join("documents.db");

    let file = write_config(&format!(
        r#"
[server]
port = 4100

[auth]
jwt_secret_env = "ECOMM_IT_JWT_SECRET"
hash_cost = 4

[database]
documents = "{}"
catalog = ":memory:"
"#,
        documents.display()
    ));

    let config = EcommConfig::load(file.path()).expect("config should load");
    assert_eq!(config.bind_address(), "127.0.0.1:4100");
    assert_eq!(config.auth.token_ttl_secs, 3600);

    let secret = config.jwt_secret().unwrap();
    let state = AppState::build(config, &secret).await.unwrap();
    let server = TestServer::new(create_app(state)).unwrap();

    server
        .post("/users/register")
        .json(&json!({ "name": "A", "email": "a@x.com", "password": "pw" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    server
        .post("/users/login")
        .json(&json!({ "email": "a@x.com", "password": "pw" }))
        .await
        .assert_status_ok();

    assert!(documents.exists());
}

#[test]
fn test_missing_secret_aborts_load() {
    let file = write_config(
        r#"
[auth]
jwt_secret_env = "ECOMM_IT_SECRET_THAT_IS_NEVER_SET"
"#,
    );

    let err = EcommConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "ECOMM_IT_SECRET_THAT_IS_NEVER_SET"));
}

#[test]
fn test_empty_secret_counts_as_missing() {
    std::env::set_var("ECOMM_IT_EMPTY_SECRET", "");
    let file = write_config(
        r#"
[auth]
jwt_secret_env = "ECOMM_IT_EMPTY_SECRET"
"#,
    );

    assert!(matches!(
        EcommConfig::load(file.path()),
        Err(ConfigError::MissingEnvVar(_))
    ));
}

#[test]
fn test_load_or_default_without_file() {
    std::env::set_var("JWT_SECRET", "default-secret");

    let config = EcommConfig::load_or_default("/nonexistent/ecomm.toml").unwrap();

    assert_eq!(config.auth.hash_cost, 10);
    assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
}
