/**
 * Database Configuration
 *
 * This module opens the SQLite connection pool, applies the embedded
 * migrations, and seeds the administrator account named in the
 * configuration.
 *
 * # Connection Strings
 *
 * Any sqlx SQLite URL is accepted. File databases are created on first use.
 * In-memory databases (`sqlite::memory:`) are pinned to a single connection
 * that never idles out, otherwise every new connection would see an empty
 * database.
 */

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::backend::auth::accounts::{create_account, get_account_by_email, set_role, NewAccount};
use crate::backend::error::BackendResult;
use crate::shared::account::Role;
use crate::shared::config::AdminSeed;

/// Connections kept open for file databases
const MAX_CONNECTIONS: u32 = 5;

/// Open the pool and run migrations
///
/// # Errors
///
/// Returns the connection or migration error; startup should abort on it.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?
    };

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

/// Close every pooled connection
pub async fn close_database(pool: &SqlitePool) {
    pool.close().await;
    tracing::info!("Database connections closed");
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Ensure the configured administrator exists
///
/// Creates the account when the email is unknown, otherwise promotes the
/// existing account. The stored password of an existing account is kept.
pub async fn seed_admin(pool: &SqlitePool, seed: &AdminSeed, bcrypt_cost: u32) -> BackendResult<()> {
    if let Some(existing) = get_account_by_email(pool, &seed.email).await? {
        if existing.role() != Role::Admin {
            set_role(pool, existing.id, Role::Admin).await?;
            tracing::info!("Promoted {} to administrator", existing.email);
        }
        return Ok(());
    }

    let password_hash = bcrypt::hash(&seed.password, bcrypt_cost)?;
    let account = create_account(
        pool,
        NewAccount {
            name: &seed.name,
            email: &seed.email,
            password_hash: &password_hash,
            institution: "",
            role: Role::Admin,
        },
    )
    .await?;
    tracing::info!("Created administrator account {}", account.email);

    Ok(())
}
