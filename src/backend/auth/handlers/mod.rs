//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request/response types
//! ├── register.rs  - POST /api/auth/register
//! ├── login.rs     - POST /api/auth/login
//! └── me.rs        - GET /api/auth/me
//! ```

/// Request/response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Current account handler
pub mod me;

pub use login::login;
pub use me::get_me;
pub use register::register;
pub use types::{AuthResponse, LoginRequest, RegisterRequest};
