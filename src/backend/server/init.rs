/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Open the database and apply migrations
 * 2. Seed the administrator account, if configured
 * 3. Build the token service and shared state
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::error::BackendResult;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, seed_admin};
use crate::backend::server::state::AppState;
use crate::shared::config::AppConfig;

/// Connect the store and assemble the application state
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated, or when the
/// administrator seed cannot be written.
pub async fn initialize(config: AppConfig) -> BackendResult<AppState> {
    tracing::info!("Initializing BRIDGEB backend server");

    let db = connect_database(&config.database_url).await?;

    if let Some(admin) = &config.admin {
        seed_admin(&db, admin, config.bcrypt_cost).await?;
    }

    Ok(AppState::new(db, config))
}

/// Create and configure the Axum application
pub fn create_app(app_state: AppState) -> Router<()> {
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
