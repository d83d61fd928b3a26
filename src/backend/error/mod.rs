//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and are converted to JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Ownership vs. Absence
//!
//! Handlers report "exists but is not yours" with the same `NotFound` as a
//! missing id, so responses never confirm another user's resource exists.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;

/// Result alias used by handlers and persistence helpers
pub type BackendResult<T> = Result<T, BackendError>;
