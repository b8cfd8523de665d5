//! Database migration command.
//!
//! Applies `crates/server/migrations/` and creates the tower-sessions table.
//! The server never migrates on startup.

use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;

use super::CommandError;

/// Run all migrations.
///
/// # Errors
///
/// Returns `CommandError::Migration` or `CommandError::SessionStore` if a
/// migration fails.
pub async fn run(pool: &PgPool) -> Result<(), CommandError> {
    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../server/migrations").run(pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .map_err(|e| CommandError::SessionStore(e.to_string()))?;

    tracing::info!("Migrations complete");
    Ok(())
}
