//! Application state shared across handlers.
//!
//! The [`Controller`] is the single owner of the in-memory snapshot. Every
//! engine operation runs under its mutex; a committed mutation is followed by
//! a full-state write to the store while the lock is still held, so writes
//! reach the store in commit order.

use std::sync::Arc;

use maruzzella_core::model::StateSnapshot;
use tokio::sync::Mutex;

use crate::claude::TextGenerator;
use crate::config::ServerConfig;
use crate::store::StateStore;

/// Owner of the in-memory state and its persistence.
pub struct Controller {
    snapshot: Mutex<StateSnapshot>,
    store: Arc<dyn StateStore>,
}

impl Controller {
    /// Hydrate from `store`, falling back to the seeded state when nothing is
    /// stored or the read fails.
    pub async fn hydrate(store: Arc<dyn StateStore>) -> Self {
        let snapshot = match store.load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(
                    backend = store.backend(),
                    employees = snapshot.employees.len(),
                    time_logs = snapshot.time_logs.len(),
                    "State loaded"
                );
                snapshot
            }
            Ok(None) => {
                tracing::info!(backend = store.backend(), "No stored state; starting from seed");
                StateSnapshot::seeded()
            }
            Err(e) => {
                tracing::warn!(backend = store.backend(), error = %e, "State load failed; starting from seed");
                StateSnapshot::seeded()
            }
        };

        Self {
            snapshot: Mutex::new(snapshot),
            store,
        }
    }

    /// Run a read-only query against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&StateSnapshot) -> R) -> R {
        let guard = self.snapshot.lock().await;
        f(&guard)
    }

    /// Run a mutation and persist the result if it succeeds.
    ///
    /// A failed operation leaves the state untouched and writes nothing. A
    /// failed write is logged; the in-memory change stands.
    ///
    /// # Errors
    ///
    /// Returns whatever error `f` returns.
    pub async fn mutate<R, E>(&self, f: impl FnOnce(&mut StateSnapshot) -> Result<R, E>) -> Result<R, E> {
        let mut guard = self.snapshot.lock().await;
        let result = f(&mut guard)?;
        self.persist(&guard).await;
        Ok(result)
    }

    /// Clone of the current state.
    pub async fn snapshot(&self) -> StateSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// Check the store is reachable.
    pub async fn ping(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    async fn persist(&self, state: &StateSnapshot) {
        if let Err(e) = self.store.save(state).await {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                backend = self.store.backend(),
                error = %e,
                sentry_event_id = %event_id,
                "State write failed; keeping in-memory state"
            );
        }
    }
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    controller: Controller,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppState {
    #[must_use]
    pub fn new(
        config: ServerConfig,
        controller: Controller,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                controller,
                generator,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.inner.controller
    }

    /// Briefing generator, if one is configured.
    #[must_use]
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.inner.generator.as_deref()
    }
}
