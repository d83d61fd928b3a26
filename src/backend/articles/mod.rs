//! Articles Module
//!
//! Submission, listing, editing and moderation of research articles.
//!
//! - **`db`** - the article store
//! - **`handlers`** - HTTP handlers for `/api/articles`
//!
//! # Lifecycle
//!
//! ```text
//! submit ──> pending ──approve──> approved
//!              │  ^
//!           reject │ author edit
//!              v  │
//!            rejected
//! ```

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    approve_article, delete_article, get_article, list_articles, list_my_articles, list_pending_articles,
    reject_article, submit_article, update_article,
};
