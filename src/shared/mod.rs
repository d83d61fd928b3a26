//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the API server and its clients. All types here are plain serde types so a
//! Rust client can reuse them without pulling in the server stack.
//!
//! # Overview
//!
//! - **`account`** - roles, account summaries, profile requests
//! - **`article`** - articles, moderation status, categories, list queries
//! - **`stats`** - dashboard counts
//! - **`error`** - request validation errors
//! - **`config`** - layered application configuration

/// Account data structures
pub mod account;

/// Article data structures
pub mod article;

/// Dashboard statistics
pub mod stats;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use account::{AccountSummary, Role, UpdateProfileRequest};
pub use article::{Article, ArticleListQuery, ArticleListResponse, ArticleRequest, ArticleStatus, Category, RejectRequest};
pub use error::SharedError;
pub use stats::{AdminStats, AuthorStats, DashboardStats};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
