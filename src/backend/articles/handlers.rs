//! HTTP handlers for articles and moderation
//!
//! Visibility rules:
//!
//! - approved articles are readable by anyone
//! - pending and rejected articles only by their author or an administrator
//! - anything the caller may not see is reported as `404`, never `403`

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::articles::db::{self, NewArticle};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::{AdminUser, AuthUser, Identity, MaybeAuthUser};
use crate::shared::article::{
    Article, ArticleListQuery, ArticleListResponse, ArticleRequest, ArticleStatus, MessageResponse, RejectRequest,
};

const NOT_FOUND: &str = "Article not found";

/// An unparseable id can name no article
fn article_id(path: Result<Path<Uuid>, PathRejection>) -> BackendResult<Uuid> {
    path.map(|Path(id)| id).map_err(|_| BackendError::not_found(NOT_FOUND))
}

fn can_view(article: &Article, viewer: Option<&Identity>) -> bool {
    article.is_public()
        || viewer.is_some_and(|v| v.is_admin() || v.account_id == article.author_id)
}

/// GET /api/articles - approved articles with search, category and paging
pub async fn list_articles(
    State(pool): State<SqlitePool>,
    query: Result<Query<ArticleListQuery>, QueryRejection>,
) -> BackendResult<Json<ArticleListResponse>> {
    let Query(query) = query?;
    let (articles, total) = db::list_public(&pool, &query).await?;
    Ok(Json(ArticleListResponse::new(articles, total, &query)))
}

/// GET /api/articles/mine - the caller's articles in every state
pub async fn list_my_articles(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
) -> BackendResult<Json<Vec<Article>>> {
    Ok(Json(db::list_by_author(&pool, identity.account_id).await?))
}

/// GET /api/articles/admin/pending - the review queue, oldest first
pub async fn list_pending_articles(
    State(pool): State<SqlitePool>,
    AdminUser(_admin): AdminUser,
) -> BackendResult<Json<Vec<Article>>> {
    Ok(Json(db::list_by_status(&pool, ArticleStatus::Pending).await?))
}

/// GET /api/articles/{id}
///
/// Counts a view on every successful read and returns the new count.
pub async fn get_article(
    State(pool): State<SqlitePool>,
    MaybeAuthUser(viewer): MaybeAuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<Article>> {
    let id = article_id(path)?;

    let article = db::get_article(&pool, id)
        .await?
        .filter(|a| can_view(a, viewer.as_ref()))
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;

    let article = db::increment_views(&pool, article.id)
        .await?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;

    Ok(Json(article))
}

/// POST /api/articles - submit for review
pub async fn submit_article(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> BackendResult<(StatusCode, Json<Article>)> {
    let Json(request) = payload?;
    request.validate()?;

    let article = db::insert_article(
        &pool,
        NewArticle {
            author_id: identity.account_id,
            author_name: &identity.name,
            request: &request,
        },
    )
    .await?;

    tracing::info!("Article {} submitted by {}", article.id, identity.account_id);
    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/articles/{id} - author edit, resubmits a rejected article
pub async fn update_article(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> BackendResult<Json<Article>> {
    let id = article_id(path)?;

    let existing = db::get_article(&pool, id)
        .await?
        .filter(|a| a.author_id == identity.account_id)
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;

    if !existing.status.is_editable() {
        return Err(BackendError::forbidden("Approved articles can no longer be edited"));
    }

    let Json(request) = payload?;
    request.validate()?;

    let article = db::update_by_author(&pool, id, identity.account_id, &request)
        .await?
        // Deleted or approved between the read and the write
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;

    tracing::info!("Article {} updated by its author", article.id);
    Ok(Json(article))
}

/// DELETE /api/articles/{id} - the author's own, or any for an administrator
pub async fn delete_article(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<MessageResponse>> {
    let id = article_id(path)?;
    let owner = (!identity.is_admin()).then_some(identity.account_id);

    if !db::delete_article(&pool, id, owner).await? {
        return Err(BackendError::not_found(NOT_FOUND));
    }

    tracing::info!("Article {} deleted by {}", id, identity.account_id);
    Ok(Json(MessageResponse::new("Article deleted successfully")))
}

/// PUT /api/articles/{id}/approve
pub async fn approve_article(
    State(pool): State<SqlitePool>,
    AdminUser(admin): AdminUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> BackendResult<Json<Article>> {
    let id = article_id(path)?;
    let article = resolve(&pool, id, ArticleStatus::Approved, None).await?;
    tracing::info!("Article {} approved by {}", id, admin.account_id);
    Ok(Json(article))
}

/// PUT /api/articles/{id}/reject - requires a non-blank reason
pub async fn reject_article(
    State(pool): State<SqlitePool>,
    AdminUser(admin): AdminUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RejectRequest>, JsonRejection>,
) -> BackendResult<Json<Article>> {
    let id = article_id(path)?;
    let Json(request) = payload?;
    request.validate()?;

    let article = resolve(&pool, id, ArticleStatus::Rejected, Some(request.reason.trim())).await?;
    tracing::info!("Article {} rejected by {}", id, admin.account_id);
    Ok(Json(article))
}

async fn resolve(
    pool: &SqlitePool,
    id: Uuid,
    status: ArticleStatus,
    reason: Option<&str>,
) -> BackendResult<Article> {
    if let Some(article) = db::resolve_pending(pool, id, status, reason).await? {
        return Ok(article);
    }

    match db::get_article(pool, id).await? {
        Some(article) => Err(BackendError::conflict(format!(
            "Article is already {}",
            article.status.as_str()
        ))),
        None => Err(BackendError::not_found(NOT_FOUND)),
    }
}
