//! HTTP handlers for accounts: profile, administration and dashboard stats

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::articles::db::{count_articles, ArticleFilter};
use crate::backend::auth::accounts::{self, count_accounts};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AdminUser, AuthUser};
use crate::shared::account::{ListAccountsResponse, ProfileResponse, UpdateProfileRequest};
use crate::shared::article::{ArticleStatus, MessageResponse};
use crate::shared::stats::{AdminStats, AuthorStats, DashboardStats};

/// PUT /api/users/profile
///
/// Omitted `bio` or `institution` keep their stored value.
pub async fn update_profile(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> BackendResult<Json<ProfileResponse>> {
    let Json(request) = payload?;
    request.validate()?;

    let current = accounts::get_account_by_id(&pool, identity.account_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    let bio = request.bio.as_deref().unwrap_or(&current.bio);
    let institution = request.institution.as_deref().unwrap_or(&current.institution);

    let account = accounts::update_profile(&pool, identity.account_id, &request.name, bio, institution)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!("Profile updated for {}", account.id);
    Ok(Json(ProfileResponse {
        user: account.summary(),
    }))
}

/// GET /api/users - every account, newest first
pub async fn list_users(
    State(pool): State<SqlitePool>,
    AdminUser(_admin): AdminUser,
) -> BackendResult<Json<ListAccountsResponse>> {
    let users = accounts::list_accounts(&pool)
        .await?
        .iter()
        .map(|a| a.summary())
        .collect();
    Ok(Json(ListAccountsResponse { users }))
}

/// DELETE /api/users/{id}
///
/// The account's articles are removed with it. Administrators cannot
/// delete their own account.
pub async fn delete_user(
    State(pool): State<SqlitePool>,
    AdminUser(admin): AdminUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let Path(id) = path.map_err(|_| BackendError::not_found("User not found"))?;

    if id == admin.account_id {
        return Err(BackendError::validation("id", "You cannot delete your own account"));
    }

    if !accounts::delete_account(&pool, id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!("Account {} deleted by {}", id, admin.account_id);
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// GET /api/users/dashboard/stats
///
/// Site-wide totals for administrators, the caller's own counts otherwise.
pub async fn dashboard_stats(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
) -> BackendResult<Json<DashboardStats>> {
    let stats = if identity.is_admin() {
        DashboardStats::Admin(admin_stats(&pool).await?)
    } else {
        DashboardStats::Author(author_stats(&pool, identity.account_id).await?)
    };
    Ok(Json(stats))
}

async fn admin_stats(pool: &SqlitePool) -> Result<AdminStats, sqlx::Error> {
    let by_status = |status| ArticleFilter {
        author_id: None,
        status: Some(status),
    };

    Ok(AdminStats {
        total_users: count_accounts(pool).await?,
        total_articles: count_articles(pool, ArticleFilter::default()).await?,
        pending_articles: count_articles(pool, by_status(ArticleStatus::Pending)).await?,
        approved_articles: count_articles(pool, by_status(ArticleStatus::Approved)).await?,
    })
}

async fn author_stats(pool: &SqlitePool, author_id: Uuid) -> Result<AuthorStats, sqlx::Error> {
    let by_status = |status| ArticleFilter {
        author_id: Some(author_id),
        status: Some(status),
    };

    Ok(AuthorStats {
        user_articles: count_articles(
            pool,
            ArticleFilter {
                author_id: Some(author_id),
                status: None,
            },
        )
        .await?,
        pending_articles: count_articles(pool, by_status(ArticleStatus::Pending)).await?,
        approved_articles: count_articles(pool, by_status(ArticleStatus::Approved)).await?,
    })
}
