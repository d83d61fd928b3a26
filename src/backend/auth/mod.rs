//! Authentication Module
//!
//! Accounts, password hashing, bearer tokens and the auth endpoints.
//!
//! - **`accounts`** - Account model and database operations
//! - **`sessions`** - JWT issuance and verification
//! - **`handlers`** - register, login and current-account handlers
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt at the configured cost
//! - Tokens are HS256 JWTs with an expiry; the role is re-read from the
//!   store on every request rather than trusted from the token

/// Account model and database operations
pub mod accounts;

/// Session management and JWT tokens
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{get_me, login, register};
pub use sessions::{Claims, TokenService};
