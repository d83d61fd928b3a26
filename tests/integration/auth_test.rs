//! Authentication API integration tests
//!
//! Register, login, token verification and the current-account endpoint.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use bridgeb::backend::auth::accounts::count_accounts;
use bridgeb::backend::auth::TokenService;
use bridgeb::shared::Role;

use crate::common::*;

#[tokio::test]
async fn test_register_login_and_empty_mine() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "A", "email": "a@x.com", "password": "secret1" }),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["user"]["role"], "user");
    assert!(response.body["user"].get("passwordHash").is_none());

    let response = app
        .post("/api/auth/login", None, json!({ "email": "a@x.com", "password": "secret1" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap().to_string();

    let response = app.get("/api/articles/mine", Some(&token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    register_user(&app, "First", "dup@example.com").await;
    let before = count_accounts(app.pool()).await.unwrap();

    for email in ["dup@example.com", "DUP@Example.com"] {
        let response = app
            .post(
                "/api/auth/register",
                None,
                json!({ "name": "Second", "email": email, "password": "secret1" }),
            )
            .await;
        assert_error!(response, StatusCode::CONFLICT);
    }

    assert_eq!(count_accounts(app.pool()).await.unwrap(), before);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "email": "x@example.com", "password": "secret1" }),
        json!({ "name": "X", "email": "not-an-email", "password": "secret1" }),
        json!({ "name": "X", "email": "x@example.com", "password": "12345" }),
    ];
    for body in cases {
        let response = app.post("/api/auth/register", None, body).await;
        assert_error!(response, StatusCode::BAD_REQUEST);
    }

    let response = app
        .request(axum::http::Method::POST, "/api/auth/register", None, Some(json!("not an object")))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_failed() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app).await;

    let wrong_password = app
        .post("/api/auth/login", None, json!({ "email": user.email, "password": "wrong-password" }))
        .await;
    let unknown_email = app
        .post("/api/auth/login", None, json!({ "email": "nobody@example.com", "password": "whatever" }))
        .await;

    assert_error!(wrong_password, StatusCode::UNAUTHORIZED, "Invalid email or password");
    assert_error!(unknown_email, StatusCode::UNAUTHORIZED, "Invalid email or password");
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new().await;
    let response = app.post("/api/auth/login", None, json!({ "email": "a@x.com" })).await;
    assert_error!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_me_returns_own_account() {
    let app = TestApp::new().await;
    let user = register_user(&app, "Lev Vygotsky", "lev@example.com").await;

    let response = app.get("/api/auth/me", Some(&user.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert_eq!(response.body["user"]["name"], "Lev Vygotsky");
}

#[tokio::test]
async fn test_protected_route_rejects_bad_tokens() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app).await;

    assert_error!(app.get("/api/auth/me", None).await, StatusCode::UNAUTHORIZED);
    assert_error!(app.get("/api/auth/me", Some("garbage")).await, StatusCode::UNAUTHORIZED);

    let tampered = user.token.replacen('.', ".e", 1);
    assert_error!(app.get("/api/auth/me", Some(&tampered)).await, StatusCode::UNAUTHORIZED);

    let foreign = TokenService::new("a-completely-different-secret", 1)
        .issue(user.id, &user.name, Role::Admin)
        .unwrap();
    assert_error!(app.get("/api/auth/me", Some(&foreign)).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_unknown_account_is_rejected() {
    let app = TestApp::new().await;
    let token = app.state.tokens.issue(Uuid::new_v4(), "Ghost", Role::Admin).unwrap();
    assert_error!(app.get("/api/auth/me", Some(&token)).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_comes_from_store_not_token() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app).await;

    // Claims say admin, the account is a plain user
    let token = app.state.tokens.issue(user.id, &user.name, Role::Admin).unwrap();
    let response = app.get("/api/articles/admin/pending", Some(&token)).await;
    assert_error!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/api/health", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    assert_error!(app.get("/api/nope", None).await, StatusCode::NOT_FOUND);
}
