//! Middleware Module
//!
//! This module contains the HTTP middleware and request extractors that
//! gate protected routes.
//!
//! - **`auth`** - bearer-token authentication, identity extractors, admin gate
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use bridgeb::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/articles/mine", get(list_my_articles))
//!     .route_layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, authenticate, bearer_token, AdminUser, AuthUser, Identity, MaybeAuthUser};
