//! `PostgreSQL` state store.
//!
//! ```sql
//! CREATE TABLE maruzzella.app_state (
//!     key TEXT PRIMARY KEY,          -- employees | rosters | timeLogs
//!     value JSONB NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use std::time::Duration;

use async_trait::async_trait;
use maruzzella_core::model::StateSnapshot;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::{StateStore, StoreError, hydrate, sections};

/// Create a `PostgreSQL` connection pool.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// State store backed by the `app_state` table.
#[derive(Clone)]
pub struct PgStateStore {
    pool: PgPool,
}

impl PgStateStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StateStore for PgStateStore {
    async fn load(&self) -> Result<Option<StateSnapshot>, StoreError> {
        let rows = sqlx::query("SELECT key, value FROM maruzzella.app_state")
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut doc = Map::new();
        for row in rows {
            let key: String = row.try_get("key")?;
            let value: Value = row.try_get("value")?;
            doc.insert(key, value);
        }
        Ok(Some(hydrate(&Value::Object(doc))))
    }

    async fn save(&self, state: &StateSnapshot) -> Result<(), StoreError> {
        let [(k1, v1), (k2, v2), (k3, v3)] = sections(state)?;

        sqlx::query(
            r"
            INSERT INTO maruzzella.app_state (key, value)
            VALUES ($1, $2), ($3, $4), ($5, $6)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            ",
        )
        .bind(k1)
        .bind(v1)
        .bind(k2)
        .bind(v2)
        .bind(k3)
        .bind(v3)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
