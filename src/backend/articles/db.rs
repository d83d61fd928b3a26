//! Database operations for articles
//!
//! The Article Store. Every mutation that depends on ownership or on the
//! moderation state carries that condition in its `WHERE` clause, so a
//! concurrent change can never be overwritten by a stale read.

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::shared::article::{estimate_read_time, Article, ArticleListQuery, ArticleRequest, ArticleStatus, Category};

const ARTICLE_COLUMNS: &str = "id, title, abstract, content, category, keywords, author_id, author_name, \
     status, rejection_reason, views, created_at, updated_at";

/// Fields of a newly submitted article
#[derive(Debug, Clone)]
pub struct NewArticle<'a> {
    pub author_id: Uuid,
    pub author_name: &'a str,
    pub request: &'a ArticleRequest,
}

/// Which articles a count covers; `None` means any
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleFilter {
    pub author_id: Option<Uuid>,
    pub status: Option<ArticleStatus>,
}

fn decode_error(message: String) -> sqlx::Error {
    sqlx::Error::Decode(message.into())
}

fn article_from_row(row: &SqliteRow) -> Result<Article, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = ArticleStatus::from_str(&status)
        .ok_or_else(|| decode_error(format!("unknown article status '{}'", status)))?;

    let category: String = row.try_get("category")?;
    let keywords: String = row.try_get("keywords")?;
    let keywords: Vec<String> =
        serde_json::from_str(&keywords).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    let content: String = row.try_get("content")?;
    let read_time = estimate_read_time(&content);

    Ok(Article {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        abstract_text: row.try_get("abstract")?,
        content,
        category: Category::from_str(&category).unwrap_or_default(),
        keywords,
        author_id: row.try_get("author_id")?,
        author_name: row.try_get("author_name")?,
        status,
        rejection_reason: row.try_get("rejection_reason")?,
        views: row.try_get("views")?,
        read_time,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn encode_keywords(request: &ArticleRequest) -> Result<String, sqlx::Error> {
    serde_json::to_string(&request.normalized_keywords()).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

/// `%term%` with LIKE wildcards in the term escaped by `\`
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Insert a new article in the pending state
pub async fn insert_article(pool: &SqlitePool, new: NewArticle<'_>) -> Result<Article, sqlx::Error> {
    let now = Utc::now();
    let request = new.request;

    let row = sqlx::query(&format!(
        r#"
        INSERT INTO articles (id, title, abstract, content, category, keywords, author_id, author_name,
                              status, rejection_reason, views, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', NULL, 0, ?, ?)
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.title.trim())
    .bind(request.abstract_text.trim())
    .bind(&request.content)
    .bind(request.category.as_str())
    .bind(encode_keywords(request)?)
    .bind(new.author_id)
    .bind(new.author_name)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    article_from_row(&row)
}

/// Get an article by ID regardless of status
pub async fn get_article(pool: &SqlitePool, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    let row = sqlx::query(&format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(article_from_row).transpose()
}

/// Add one view and return the updated article
pub async fn increment_views(pool: &SqlitePool, id: Uuid) -> Result<Option<Article>, sqlx::Error> {
    let row = sqlx::query(&format!(
        "UPDATE articles SET views = views + 1 WHERE id = ? RETURNING {ARTICLE_COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(article_from_row).transpose()
}

/// One page of approved articles, newest first, plus the total match count
///
/// The search term matches title, abstract or keywords, case-insensitively.
pub async fn list_public(
    pool: &SqlitePool,
    query: &ArticleListQuery,
) -> Result<(Vec<Article>, i64), sqlx::Error> {
    let category = query.category.map(|c| c.as_str());
    let pattern = query.search_term().map(like_pattern);

    let filter = r#"
        status = 'approved'
        AND (?1 IS NULL OR category = ?1)
        AND (?2 IS NULL
             OR title LIKE ?2 ESCAPE '\'
             OR abstract LIKE ?2 ESCAPE '\'
             OR EXISTS (SELECT 1 FROM json_each(articles.keywords)
                        WHERE json_each.value LIKE ?2 ESCAPE '\'))
    "#;

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM articles WHERE {filter}"))
        .bind(category)
        .bind(pattern.as_deref())
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query(&format!(
        r#"
        SELECT {ARTICLE_COLUMNS} FROM articles
        WHERE {filter}
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?3 OFFSET ?4
        "#
    ))
    .bind(category)
    .bind(pattern.as_deref())
    .bind(i64::from(query.limit()))
    .bind(i64::from(query.offset()))
    .fetch_all(pool)
    .await?;

    let articles = rows.iter().map(article_from_row).collect::<Result<Vec<_>, _>>()?;
    Ok((articles, total))
}

/// Every article by one author in any state, newest first
pub async fn list_by_author(pool: &SqlitePool, author_id: Uuid) -> Result<Vec<Article>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE author_id = ? ORDER BY created_at DESC, rowid DESC"
    ))
    .bind(author_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(article_from_row).collect()
}

/// Articles in one state, oldest first (review queue order)
pub async fn list_by_status(pool: &SqlitePool, status: ArticleStatus) -> Result<Vec<Article>, sqlx::Error> {
    let rows = sqlx::query(&format!(
        "SELECT {ARTICLE_COLUMNS} FROM articles WHERE status = ? ORDER BY created_at ASC, rowid ASC"
    ))
    .bind(status.as_str())
    .fetch_all(pool)
    .await?;

    rows.iter().map(article_from_row).collect()
}

/// Replace the fields of an article owned by `author_id`
///
/// Only matches while the article is not approved. The edit puts the
/// article back in the review queue and clears any rejection reason.
/// Returns `None` when nothing matched.
pub async fn update_by_author(
    pool: &SqlitePool,
    id: Uuid,
    author_id: Uuid,
    request: &ArticleRequest,
) -> Result<Option<Article>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE articles
        SET title = ?, abstract = ?, content = ?, category = ?, keywords = ?,
            status = 'pending', rejection_reason = NULL, updated_at = ?
        WHERE id = ? AND author_id = ? AND status != 'approved'
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(request.title.trim())
    .bind(request.abstract_text.trim())
    .bind(&request.content)
    .bind(request.category.as_str())
    .bind(encode_keywords(request)?)
    .bind(Utc::now())
    .bind(id)
    .bind(author_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(article_from_row).transpose()
}

/// Delete an article
///
/// With `owner` set, only an article by that author matches.
pub async fn delete_article(pool: &SqlitePool, id: Uuid, owner: Option<Uuid>) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM articles WHERE id = ?1 AND (?2 IS NULL OR author_id = ?2)")
        .bind(id)
        .bind(owner)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Move a pending article to `status`
///
/// Returns `None` if the article does not exist or is no longer pending.
pub async fn resolve_pending(
    pool: &SqlitePool,
    id: Uuid,
    status: ArticleStatus,
    rejection_reason: Option<&str>,
) -> Result<Option<Article>, sqlx::Error> {
    let row = sqlx::query(&format!(
        r#"
        UPDATE articles
        SET status = ?, rejection_reason = ?, updated_at = ?
        WHERE id = ? AND status = 'pending'
        RETURNING {ARTICLE_COLUMNS}
        "#
    ))
    .bind(status.as_str())
    .bind(rejection_reason)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(article_from_row).transpose()
}

/// Count articles matching a filter
pub async fn count_articles(pool: &SqlitePool, filter: ArticleFilter) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE (?1 IS NULL OR author_id = ?1) AND (?2 IS NULL OR status = ?2)")
        .bind(filter.author_id)
        .bind(filter.status.map(|s| s.as_str()))
        .fetch_one(pool)
        .await
}
