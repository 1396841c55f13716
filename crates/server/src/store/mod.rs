//! Persistence gateway: whole-state load and save.
//!
//! # Backends
//!
//! - [`PgStateStore`] - one JSONB row per collection in `maruzzella.app_state`
//! - [`FileStateStore`] - a pretty-printed JSON data file
//!
//! Writes are last-write-wins over the whole state. There is no versioning
//! and no merge.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p maruzzella-cli -- migrate
//! ```

pub mod file;
pub mod pg;

use std::sync::Arc;

use async_trait::async_trait;
use maruzzella_core::model::StateSnapshot;
use serde_json::Value;
use thiserror::Error;

use crate::config::StoreConfig;

pub use file::FileStateStore;
pub use pg::{PgStateStore, create_pool};

/// Errors that can occur while reading or writing the state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored state is not valid JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Get/set of the whole application state.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Read the stored state. `Ok(None)` means nothing has been stored yet.
    ///
    /// Sections that are missing or malformed in storage fall back to the
    /// seeded default.
    async fn load(&self) -> Result<Option<StateSnapshot>, StoreError>;

    /// Overwrite the stored state with `state`.
    async fn save(&self, state: &StateSnapshot) -> Result<(), StoreError>;

    /// Check the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Open the store selected by `config`.
///
/// # Errors
///
/// Returns `StoreError::Database` if the `PostgreSQL` pool cannot be created.
pub async fn open(config: &StoreConfig) -> Result<Arc<dyn StateStore>, StoreError> {
    Ok(match config {
        StoreConfig::Postgres(url) => Arc::new(PgStateStore::new(create_pool(url).await?)),
        StoreConfig::File(path) => Arc::new(FileStateStore::new(path.clone())),
    })
}

/// Seeded state with every well-formed section of `doc` applied.
fn hydrate(doc: &Value) -> StateSnapshot {
    let mut state = StateSnapshot::seeded();
    let applied = state.apply_sections(doc);
    if applied.len() < 3 {
        tracing::warn!(?applied, "stored state incomplete; using defaults for the rest");
    }
    state
}

/// The three collections as `(key, value)` pairs, in storage order.
fn sections(state: &StateSnapshot) -> Result<[(&'static str, Value); 3], StoreError> {
    Ok([
        (StateSnapshot::EMPLOYEES, serde_json::to_value(&state.employees)?),
        (StateSnapshot::ROSTERS, serde_json::to_value(&state.rosters)?),
        (StateSnapshot::TIME_LOGS, serde_json::to_value(&state.time_logs)?),
    ])
}
