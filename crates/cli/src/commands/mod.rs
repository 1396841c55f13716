//! Subcommand implementations.
//!
//! Every command works on the store the server would use, picked from the
//! same environment variables (`MARUZZELLA_DATABASE_URL` or
//! `MARUZZELLA_DATA_FILE`).

pub mod export;
pub mod migrate;
pub mod seed;
pub mod state;

use std::path::Path;
use std::sync::Arc;

use maruzzella_core::model::StateSnapshot;
use maruzzella_server::config::{ConfigError, ServerConfig};
use maruzzella_server::store::{self, StateStore, StoreError};
use thiserror::Error;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Usage(String),
}

/// Open the configured store.
async fn open_store() -> Result<Arc<dyn StateStore>, CliError> {
    let config = ServerConfig::from_env()?;
    let store = store::open(&config.store).await?;
    tracing::info!(backend = store.backend(), "Store opened");
    Ok(store)
}

/// Stored state, or the seeded state when nothing is stored yet.
async fn load_or_seed(store: &dyn StateStore) -> Result<StateSnapshot, CliError> {
    Ok(match store.load().await? {
        Some(state) => state,
        None => {
            tracing::warn!("No stored state; using the seeded defaults");
            StateSnapshot::seeded()
        }
    })
}

/// Write `body` to `path`, or to stdout when no path is given.
async fn write_output(path: Option<&Path>, body: &str) -> std::io::Result<()> {
    match path {
        Some(path) => {
            tokio::fs::write(path, body).await?;
            tracing::info!(path = %path.display(), bytes = body.len(), "Written");
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                print!("{body}");
            }
        }
    }
    Ok(())
}
