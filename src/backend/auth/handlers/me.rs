/**
 * Current Account Handler
 *
 * GET /api/auth/me and GET /api/users/profile both return the caller's own
 * account summary.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::accounts::get_account_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::shared::account::ProfileResponse;

/// Get the authenticated account
///
/// Requires `auth_middleware`; the account was already re-read from the
/// store there, this fetches the full row for the summary.
pub async fn get_me(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
) -> BackendResult<Json<ProfileResponse>> {
    let account = get_account_by_id(&pool, identity.account_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    Ok(Json(ProfileResponse {
        user: account.summary(),
    }))
}
