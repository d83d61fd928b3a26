//! Dashboard statistics
//!
//! Counts shown on the author and administrator dashboards. They are always
//! derived from the stores at query time.

use serde::{Deserialize, Serialize};

/// Platform-wide counts for administrators
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: i64,
    pub total_articles: i64,
    pub pending_articles: i64,
    pub approved_articles: i64,
}

/// Counts over the caller's own articles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStats {
    pub user_articles: i64,
    pub pending_articles: i64,
    pub approved_articles: i64,
}

/// Dashboard payload, shaped by the caller's role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DashboardStats {
    Admin(AdminStats),
    Author(AuthorStats),
}
