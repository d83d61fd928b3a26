/**
 * API Route Handlers
 *
 * This module defines the `/api` routes.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/auth/register` - Account registration
 * - `POST /api/auth/login` - Login
 * - `GET /api/articles` - Approved articles (search, category, paging)
 * - `GET /api/articles/{id}` - One article; a token widens visibility
 * - `GET /api/health` - Liveness check
 *
 * ## Authenticated
 * - `GET /api/auth/me`, `GET /api/users/profile` - Current account
 * - `PUT /api/users/profile` - Update profile
 * - `GET /api/users/dashboard/stats` - Dashboard counts
 * - `POST /api/articles` - Submit an article
 * - `GET /api/articles/mine` - Own articles
 * - `PUT /api/articles/{id}`, `DELETE /api/articles/{id}` - Edit, delete
 *
 * ## Administrator
 * - `GET /api/articles/admin/pending` - Review queue
 * - `PUT /api/articles/{id}/approve`, `PUT /api/articles/{id}/reject`
 * - `GET /api/users`, `DELETE /api/users/{id}`
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::backend::articles::{
    approve_article, delete_article, get_article, list_articles, list_my_articles, list_pending_articles,
    reject_article, submit_article, update_article,
};
use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::users::{dashboard_stats, delete_user, list_users, update_profile};

/// Configure API routes
///
/// Paths are relative; the caller nests the result under `/api`.
/// Authenticated routes sit behind `auth_middleware`; the administrator
/// check happens in the `AdminUser` extractor.
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/articles", get(list_articles))
        .route("/articles/{id}", get(get_article));

    let protected = Router::new()
        .route("/auth/me", get(get_me))
        .route("/users", get(list_users))
        .route("/users/profile", get(get_me).put(update_profile))
        .route("/users/dashboard/stats", get(dashboard_stats))
        .route("/users/{id}", delete(delete_user))
        .route("/articles", post(submit_article))
        .route("/articles/mine", get(list_my_articles))
        .route("/articles/admin/pending", get(list_pending_articles))
        .route("/articles/{id}", put(update_article).delete(delete_article))
        .route("/articles/{id}/approve", put(approve_article))
        .route("/articles/{id}/reject", put(reject_article))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    public.merge(protected)
}

/// GET /api/health
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
