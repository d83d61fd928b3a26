//! BRIDGEB - Main Library
//!
//! BRIDGEB is a publishing backend for educational research. Registered
//! researchers submit articles; an administrator approves or rejects each
//! one; approved articles are publicly searchable.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared with clients
//!   - Accounts, articles, categories, list queries, dashboard stats
//!   - Validation errors
//!   - Layered configuration
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP API under `/api`
//!   - SQLite persistence via sqlx
//!   - bcrypt passwords and JWT bearer tokens
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use bridgeb::backend::server::{create_app, initialize};
//! use bridgeb::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let state = initialize(AppConfig::load()?).await?;
//! let app = create_app(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types (always compiled)
pub mod shared;

/// Server-side code (requires `ssr` feature)
#[cfg(feature = "ssr")]
pub mod backend;
