//! Authentication test helpers
//!
//! Register users and log in through the real endpoints so tests exercise
//! the same path as clients.

use serde_json::{json, Value};
use uuid::Uuid;

use super::database::{TestApp, ADMIN_EMAIL, ADMIN_PASSWORD};

/// A registered account and its bearer token
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

fn user_from(body: &Value, password: &str) -> TestUser {
    TestUser {
        id: body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("response carries a user id"),
        name: body["user"]["name"].as_str().unwrap_or_default().to_string(),
        email: body["user"]["email"].as_str().unwrap_or_default().to_string(),
        password: password.to_string(),
        token: body["token"].as_str().expect("response carries a token").to_string(),
    }
}

/// Register a user through `POST /api/auth/register`
pub async fn register_user(app: &TestApp, name: &str, email: &str) -> TestUser {
    let password = "password123";
    let response = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": name, "email": email, "password": password }),
        )
        .await;
    assert_eq!(response.status, 201, "register failed: {:?}", response.body);
    user_from(&response.body, password)
}

/// Register a user with a unique email
pub async fn register_unique_user(app: &TestApp) -> TestUser {
    let email = format!("user_{}@example.com", Uuid::new_v4().simple());
    register_user(app, "Test Researcher", &email).await
}

/// Log in as the seeded administrator
pub async fn login_admin(app: &TestApp) -> TestUser {
    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        )
        .await;
    assert_eq!(response.status, 200, "admin login failed: {:?}", response.body);
    user_from(&response.body, ADMIN_PASSWORD)
}
