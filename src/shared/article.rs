//! Article Data Structures
//!
//! Represents submitted research articles, their moderation state, and the
//! request/response bodies of the article endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::{require, SharedError};

/// Minimum title length in characters
pub const MIN_TITLE_LEN: usize = 3;
/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 200;
/// Minimum body length in characters
pub const MIN_CONTENT_LEN: usize = 10;
/// Reading speed used for the read-time estimate
pub const WORDS_PER_MINUTE: usize = 200;
/// Page size when the client does not ask for one
pub const DEFAULT_PAGE_SIZE: u32 = 12;
/// Largest page a client may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// Moderation state of an article
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    /// Waiting for an administrator
    #[default]
    Pending,
    /// Publicly visible
    Approved,
    /// Turned down, with a reason
    Rejected,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::Pending => "pending",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(ArticleStatus::Pending),
            "approved" => Some(ArticleStatus::Approved),
            "rejected" => Some(ArticleStatus::Rejected),
            _ => None,
        }
    }

    /// Whether the author may still change the article
    pub fn is_editable(&self) -> bool {
        !matches!(self, ArticleStatus::Approved)
    }
}

/// Subject area of an article
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Category {
    #[serde(rename = "Education Technology")]
    EducationTechnology,
    #[serde(rename = "Curriculum Development")]
    CurriculumDevelopment,
    #[serde(rename = "Teaching Methods")]
    TeachingMethods,
    #[serde(rename = "Student Assessment")]
    StudentAssessment,
    #[serde(rename = "Educational Psychology")]
    EducationalPsychology,
    #[serde(rename = "Special Education")]
    SpecialEducation,
    #[serde(rename = "Higher Education")]
    HigherEducation,
    #[serde(rename = "Early Childhood Education")]
    EarlyChildhoodEducation,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::EducationTechnology,
        Category::CurriculumDevelopment,
        Category::TeachingMethods,
        Category::StudentAssessment,
        Category::EducationalPsychology,
        Category::SpecialEducation,
        Category::HigherEducation,
        Category::EarlyChildhoodEducation,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::EducationTechnology => "Education Technology",
            Category::CurriculumDevelopment => "Curriculum Development",
            Category::TeachingMethods => "Teaching Methods",
            Category::StudentAssessment => "Student Assessment",
            Category::EducationalPsychology => "Educational Psychology",
            Category::SpecialEducation => "Special Education",
            Category::HigherEducation => "Higher Education",
            Category::EarlyChildhoodEducation => "Early Childhood Education",
            Category::Other => "Other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

/// A research article as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub content: String,
    pub category: Category,
    pub keywords: Vec<String>,
    pub author_id: Uuid,
    /// Author display name captured at submission time
    pub author_name: String,
    pub status: ArticleStatus,
    pub rejection_reason: Option<String>,
    pub views: i64,
    /// Estimated reading time in minutes
    pub read_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_public(&self) -> bool {
        self.status == ArticleStatus::Approved
    }
}

/// Body of a submit or edit request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ArticleRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("title", &self.title, "Title and content are required")?;
        require("content", &self.content, "Title and content are required")?;

        let title_len = self.title.trim().chars().count();
        if title_len < MIN_TITLE_LEN {
            return Err(SharedError::validation(
                "title",
                format!("Title must be at least {} characters", MIN_TITLE_LEN),
            ));
        }
        if title_len > MAX_TITLE_LEN {
            return Err(SharedError::validation(
                "title",
                format!("Title must be at most {} characters", MAX_TITLE_LEN),
            ));
        }
        if self.content.trim().chars().count() < MIN_CONTENT_LEN {
            return Err(SharedError::validation(
                "content",
                format!("Content must be at least {} characters", MIN_CONTENT_LEN),
            ));
        }
        Ok(())
    }

    /// Keywords trimmed, with blanks removed
    pub fn normalized_keywords(&self) -> Vec<String> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Body of a reject request
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RejectRequest {
    #[serde(default)]
    pub reason: String,
}

impl RejectRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("reason", &self.reason, "A rejection reason is required")
    }
}

/// Query parameters accepted by the public listing
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArticleListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl ArticleListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> u32 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// Search term, or `None` when blank
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One page of the public listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub articles: Vec<Article>,
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
}

impl ArticleListResponse {
    pub fn new(articles: Vec<Article>, total: i64, query: &ArticleListQuery) -> Self {
        let limit = i64::from(query.limit());
        let total_pages = ((total + limit - 1) / limit).max(1);
        Self {
            articles,
            total,
            page: query.page(),
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Estimate reading time in minutes for rich-text or plain content
///
/// Markup between `<` and `>` is ignored. A `<` only opens a tag when it is
/// followed by a letter, `/` or `!`, so comparisons in plain text still count.
/// Never returns less than one minute.
pub fn estimate_read_time(content: &str) -> u32 {
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '<' if !in_tag
                && chars
                    .peek()
                    .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!')) =>
            {
                in_tag = true
            }
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
