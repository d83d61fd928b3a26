//! Users Module
//!
//! Profile editing, account administration and dashboard statistics under
//! `/api/users`. Reading one's own profile shares the `get_me` handler.

/// HTTP handlers
pub mod handlers;

pub use handlers::{dashboard_stats, delete_user, list_users, update_profile};
