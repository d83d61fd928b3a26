/**
 * Register Handler
 *
 * This module implements the registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate required fields, email shape and password length
 * 2. Check if the email is already registered
 * 3. Hash the password using bcrypt at the configured cost
 * 4. Create the account with the `user` role
 * 5. Issue a bearer token and return it with the account summary
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use bcrypt::hash;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::accounts::{create_account, get_account_by_email, is_unique_violation, NewAccount};
use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::account::Role;
use crate::shared::config::AppConfig;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing field, malformed email or short password
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing, persistence or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "password": "analytical"
/// }
/// ```
pub async fn register(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<AuthResponse>)> {
    let Json(request) = payload?;
    tracing::info!("Register request for email: {}", request.email);

    request.validate()?;

    if get_account_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(BackendError::conflict("User already exists with this email"));
    }

    let password_hash = hash(&request.password, config.bcrypt_cost)?;

    let account = create_account(
        &pool,
        NewAccount {
            name: &request.name,
            email: &request.email,
            password_hash: &password_hash,
            institution: request.institution.as_deref().unwrap_or(""),
            role: Role::User,
        },
    )
    .await
    .map_err(|e| {
        // Lost a race with a concurrent registration of the same email
        if is_unique_violation(&e) {
            BackendError::conflict("User already exists with this email")
        } else {
            BackendError::from(e)
        }
    })?;

    let token = tokens.issue(account.id, &account.name, account.role())?;

    tracing::info!("Account created: {} ({})", account.email, account.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: account.summary(),
        }),
    ))
}
