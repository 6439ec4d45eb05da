//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = format!("register_test_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "SecurePassword123!"
    });

    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CREATED);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
    assert!(!response["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(response["token_type"], "Bearer");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let email = format!("duplicate_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "SecurePassword123!"
    });

    // First registration should succeed
    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    // Second registration with same email should fail
    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": "not-an-email",
        "password": "SecurePassword123!"
    });

    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_weak_password() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": "weak_password@example.com",
        "password": "123"
    });

    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success() {
    let app = common::TestApp::new().await;

    let email = format!("login_test_{}@example.com", uuid::Uuid::new_v4());
    let password = "SecurePassword123!";

    // Register first
    let register_body = json!({
        "email": email,
        "password": password
    });
    app.post("/api/v1/auth/register", &register_body.to_string()).await;

    // Then login
    let login_body = json!({
        "email": email,
        "password": password
    });
    let (status, response) = app.post("/api/v1/auth/login", &login_body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;

    let email = format!("wrong_pass_{}@example.com", uuid::Uuid::new_v4());

    // Register
    let register_body = json!({
        "email": email,
        "password": "CorrectPassword123!"
    });
    app.post("/api/v1/auth/register", &register_body.to_string()).await;

    // Login with wrong password
    let login_body = json!({
        "email": email,
        "password": "WrongPassword123!"
    });
    let (status, _) = app.post("/api/v1/auth/login", &login_body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_nonexistent_user() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": "nonexistent@example.com",
        "password": "SomePassword123!"
    });

    let (status, _) = app.post("/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_token() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;
    let refresh_token = user.tokens.refresh_token.clone();

    let body = json!({
        "refresh_token": refresh_token
    });

    let (status, response) = app.post("/api/v1/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let response: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!response["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_token_invalid() {
    let app = common::TestApp::new().await;

    let body = json!({
        "refresh_token": "invalid-token"
    });

    let (status, _) = app.post("/api/v1/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_protected_endpoint_with_expired_token() {
    let app = common::TestApp::new().await;

    // Use a clearly invalid/expired token
    let fake_token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIiwiZXhwIjoxfQ.invalid";

    let (status, _) = app.get_auth("/api/v1/auth/me", fake_token).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_normalizes_email_domain() {
    let app = common::TestApp::new().await;

    let local = format!("case_{}", uuid::Uuid::new_v4().simple());
    let register_body = json!({
        "email": format!("{}@EXAMPLE.com", local),
        "password": "SecurePassword123!"
    });
    let (status, _) = app.post("/api/v1/auth/register", &register_body.to_string()).await;
    assert_eq!(status, StatusCode::CREATED);

    let login_body = json!({
        "email": format!("{}@example.com", local),
        "password": "SecurePassword123!"
    });
    let (status, _) = app.post("/api/v1/auth/login", &login_body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_get_profile() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app.get_auth("/api/v1/auth/me", user.token()).await;

    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["id"], user.id.to_string());
    assert_eq!(profile["email"], user.email);
    assert_eq!(profile["name"], "Test User");
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_name_and_password() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "name": "Renamed", "password": "AnotherPassword456!" });
    let (status, response) = app
        .patch_auth("/api/v1/auth/me", user.token(), &body.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    let profile: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(profile["name"], "Renamed");

    let old_login = json!({ "email": user.email, "password": "SecurePassword123!" });
    let (status, _) = app.post("/api/v1/auth/login", &old_login.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let new_login = json!({ "email": user.email, "password": "AnotherPassword456!" });
    let (status, _) = app.post("/api/v1/auth/login", &new_login.to_string()).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_update_profile_rejects_short_password() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app
        .patch_auth("/api/v1/auth/me", user.token(), r#"{"password":"short"}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_duplicate_registration_conflicts() {
    let app = common::TestApp::new().await;

    let email = format!("race_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "email": email,
        "password": "SecurePassword123!"
    })
    .to_string();

    let (first, second) = tokio::join!(
        app.post("/api/v1/auth/register", &body),
        app.post("/api/v1/auth/register", &body)
    );

    let mut statuses = [first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_overlong_name_rejected() {
    let app = common::TestApp::new().await;
    let long_name = "n".repeat(300);

    let body = json!({
        "email": format!("long_name_{}@example.com", uuid::Uuid::new_v4()),
        "password": "SecurePassword123!",
        "name": long_name
    });
    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response.contains("VALIDATION_ERROR"));

    let user = app.create_test_user().await;
    let update = json!({ "name": long_name });
    let (status, _) = app
        .patch_auth("/api/v1/auth/me", user.token(), &update.to_string())
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, profile) = app.get_auth("/api/v1/auth/me", user.token()).await;
    assert!(profile.contains("Test User"));
}
