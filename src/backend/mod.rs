//! Backend Module
//!
//! This module contains all server-side code for BRIDGEB: an Axum HTTP API
//! over a SQLite store where researchers publish articles that an
//! administrator reviews before they become public.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Initialization, application state, database setup
//! - **`routes`** - Route table and shared HTTP layers
//! - **`auth`** - Accounts, password hashing, JWT tokens, auth endpoints
//! - **`articles`** - Article store, listing, editing and moderation
//! - **`users`** - Profiles, account administration, dashboard stats
//! - **`middleware`** - Bearer authentication and identity extractors
//! - **`error`** - Backend error taxonomy and JSON error responses
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── articles/       - Articles and moderation
//! ├── users/          - Profiles and administration
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! request ─> TraceLayer ─> CorsLayer ─> router
//!              └─> [auth_middleware] ─> extractors ─> handler ─> store
//! ```
//!
//! Handlers return `BackendResult<T>`; errors render as
//! `{"message": ..., "status": ...}` with the matching status code.

/// Server initialization, state, database
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication
pub mod auth;

/// Articles and moderation
pub mod articles;

/// Profiles and account administration
pub mod users;

/// Request middleware
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::{BackendError, BackendResult};
pub use server::{create_app, initialize, AppState};
