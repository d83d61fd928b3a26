/**
 * Login Handler
 *
 * This module implements the login handler for POST /api/auth/login.
 *
 * Unknown emails and wrong passwords produce the same `InvalidCredentials`
 * error, so the response never reveals which accounts exist. An unknown
 * email still pays for one bcrypt round at the configured cost so the
 * response time does not give it away either.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use bcrypt::{hash, verify};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::accounts::get_account_by_email;
use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::TokenService;
use crate::backend::error::{BackendError, BackendResult};
use crate::shared::AppConfig;

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - stored hash unreadable or token failure
pub async fn login(
    State(pool): State<SqlitePool>,
    State(tokens): State<Arc<TokenService>>,
    State(config): State<Arc<AppConfig>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> BackendResult<Json<AuthResponse>> {
    let Json(request) = payload?;
    tracing::info!("Login request for email: {}", request.email);

    request.validate()?;

    let account = get_account_by_email(&pool, &request.email).await?;
    let stored_hash = account.as_ref().map(|a| a.password_hash.as_str());

    if !check_password(&request.password, stored_hash, config.bcrypt_cost)? {
        match &account {
            Some(account) => tracing::warn!("Invalid password for account: {}", account.id),
            None => tracing::warn!("Login for unknown email: {}", request.email),
        }
        return Err(BackendError::InvalidCredentials);
    }
    let account = account.ok_or(BackendError::InvalidCredentials)?;

    let token = tokens.issue(account.id, &account.name, account.role())?;

    tracing::info!("Login successful: {}", account.email);

    Ok(Json(AuthResponse {
        token,
        user: account.summary(),
    }))
}

/// Verify a password against the stored hash, or burn an equivalent bcrypt
/// round and fail when there is no account
fn check_password(password: &str, stored_hash: Option<&str>, cost: u32) -> BackendResult<bool> {
    match stored_hash {
        Some(stored_hash) => Ok(verify(password, stored_hash)?),
        None => {
            hash(password, cost)?;
            Ok(false)
        }
    }
}
