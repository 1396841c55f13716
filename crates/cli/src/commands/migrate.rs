//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! mz-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `MARUZZELLA_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Server migrations: `crates/server/migrations/`
//!
//! ```text
//! migrations/
//! ├── 20250601000000_app_state.sql
//! └── 20250601000001_sessions.sql
//! ```

use maruzzella_server::config::{ServerConfig, StoreConfig};
use maruzzella_server::store::create_pool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("No database configured. Set MARUZZELLA_DATABASE_URL to run migrations.")]
    NoDatabase,

    #[error(transparent)]
    Config(#[from] maruzzella_server::config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the server's database migrations.
///
/// # Errors
///
/// Returns an error if no database is configured, the connection fails, or a
/// migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let config = ServerConfig::from_env()?;
    let StoreConfig::Postgres(url) = &config.store else {
        return Err(MigrationError::NoDatabase);
    };

    tracing::info!("Connecting to database...");
    let pool = create_pool(url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
