/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * an authenticated account. It extracts and verifies the bearer token from
 * the Authorization header, re-reads the account from the store, and
 * attaches the resulting `Identity` to the request for downstream handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::accounts::get_account_by_id;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::account::Role;

/// Identity of the account behind a request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub account_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fail with `Forbidden` unless this identity is an administrator
    pub fn require_admin(&self) -> BackendResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::warn!("Account {} attempted an administrator action", self.account_id);
            Err(BackendError::forbidden("Administrator access required"))
        }
    }
}

/// Authentication middleware
///
/// Returns 401 if the token is missing, malformed, expired, forged, or
/// belongs to an account that no longer exists.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?.ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        BackendError::unauthorized("Access token required")
    })?;

    let identity = authenticate(&app_state, token).await?;
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Bearer token from the headers
///
/// `Ok(None)` when there is no Authorization header at all; an error when
/// one is present but not of the form `Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> BackendResult<Option<&str>> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized("Invalid authorization header")
        })?;

    Ok(Some(token))
}

/// Verify a token and resolve it to a live account
pub async fn authenticate(app_state: &AppState, token: &str) -> BackendResult<Identity> {
    let claims = app_state.tokens.verify(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e.kind());
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let account_id = claims.account_id().ok_or_else(|| {
        tracing::warn!("Token subject is not an account id");
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let account = get_account_by_id(&app_state.db, account_id).await?.ok_or_else(|| {
        tracing::warn!("Token for deleted account {}", account_id);
        BackendError::unauthorized("Account no longer exists")
    })?;

    Ok(Identity {
        account_id: account.id,
        name: account.name.clone(),
        role: account.role(),
    })
}

/// Axum extractor for the authenticated account
///
/// Requires `auth_middleware` on the route.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let identity = parts.extensions.get::<Identity>().cloned().ok_or_else(|| {
            tracing::warn!("Identity not found in request extensions");
            BackendError::unauthorized("Access token required")
        })?;

        Ok(AuthUser(identity))
    }
}

/// Axum extractor for an authenticated administrator
#[derive(Clone, Debug)]
pub struct AdminUser(pub Identity);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        identity.require_admin()?;
        Ok(AdminUser(identity))
    }
}

/// Axum extractor for routes readable with or without a token
///
/// No header yields `None`; a header with a bad token is still rejected.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<Identity>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<Identity>() {
            return Ok(MaybeAuthUser(Some(identity.clone())));
        }

        match bearer_token(&parts.headers)? {
            Some(token) => Ok(MaybeAuthUser(Some(authenticate(state, token).await?))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}
