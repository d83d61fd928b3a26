/**
 * Account Model and Database Operations
 *
 * This module is the Account Store: account rows and the queries over them.
 * Emails are stored trimmed and lowercased so uniqueness is case-insensitive.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::account::{AccountSummary, Role};

const ACCOUNT_COLUMNS: &str =
    "id, name, email, password_hash, bio, institution, role, created_at, updated_at";

/// Account row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique account ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Login email (unique, lowercased)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    pub bio: String,
    pub institution: String,
    /// `user` or `admin`
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Parsed role; unknown values fall back to the least privileged role
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or_default()
    }

    /// Public view without the password hash
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role(),
            bio: self.bio.clone(),
            institution: self.institution.clone(),
            created_at: self.created_at,
        }
    }
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Fields of a new account
#[derive(Debug, Clone)]
pub struct NewAccount<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub institution: &'a str,
    pub role: Role,
}

/// Create a new account
///
/// Fails with a unique-violation database error if the email is taken.
pub async fn create_account(pool: &SqlitePool, new: NewAccount<'_>) -> Result<Account, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Account>(&format!(
        r#"
        INSERT INTO accounts (id, name, email, password_hash, bio, institution, role, created_at, updated_at)
        VALUES (?, ?, ?, ?, '', ?, ?, ?, ?)
        RETURNING {ACCOUNT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.name.trim())
    .bind(normalize_email(new.email))
    .bind(new.password_hash)
    .bind(new.institution.trim())
    .bind(new.role.as_str())
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get account by email
pub async fn get_account_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE email = ?"))
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await
}

/// Get account by ID
pub async fn get_account_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// All accounts, newest first
pub async fn list_accounts(pool: &SqlitePool) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts ORDER BY created_at DESC, rowid DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Update the profile fields of one account
///
/// Role and email are not touched. Returns `None` when the account is gone.
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    name: &str,
    bio: &str,
    institution: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(&format!(
        r#"
        UPDATE accounts
        SET name = ?, bio = ?, institution = ?, updated_at = ?
        WHERE id = ?
        RETURNING {ACCOUNT_COLUMNS}
        "#
    ))
    .bind(name.trim())
    .bind(bio.trim())
    .bind(institution.trim())
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Change the role of an account
pub async fn set_role(pool: &SqlitePool, id: Uuid, role: Role) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE accounts SET role = ?, updated_at = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(Utc::now())
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Delete an account; its articles go with it through the foreign key
pub async fn delete_account(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Number of registered accounts
pub async fn count_accounts(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
        .fetch_one(pool)
        .await
}

/// Whether an error is a unique-constraint violation
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
