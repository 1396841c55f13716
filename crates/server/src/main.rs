//! Maruzzella server - staff roster, time clock and payroll API.
//!
//! This binary serves the JSON API on port 4000 by default.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - One in-memory state owned by the controller, written through to storage
//!   after every change
//! - `PostgreSQL` (`maruzzella.app_state`) when a database URL is set,
//!   otherwise a JSON data file
//! - PIN login with tower-sessions cookies
//! - Optional Claude client for the daily briefing

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use maruzzella_server::build_router;
use maruzzella_server::claude::{ClaudeClient, TextGenerator};
use maruzzella_server::config::{ServerConfig, StoreConfig};
use maruzzella_server::middleware::pg_session_store;
use maruzzella_server::state::{AppState, Controller};
use maruzzella_server::store::{FileStateStore, PgStateStore, StateStore, create_pool};
use sentry::integrations::tracing as sentry_tracing;
use tower_sessions::MemoryStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ServerConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not initialized yet
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Failed to load configuration: {e}");
            }
            std::process::exit(1);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maruzzella_server=info,tower_http=debug".into());

    // Use JSON format on Fly.io for structured log parsing, text format locally
    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(config).await {
        tracing::error!("Server failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let generator = briefing_generator(&config);
    let addr = config.socket_addr();

    // NOTE: Migrations are NOT run automatically on startup.
    // Run them explicitly via: cargo run -p maruzzella-cli -- migrate
    let app = match &config.store {
        StoreConfig::Postgres(url) => {
            let pool = create_pool(url).await?;
            tracing::info!("Database pool created");
            let sessions = pg_session_store(&pool)?;
            let store: Arc<dyn StateStore> = Arc::new(PgStateStore::new(pool));
            let controller = Controller::hydrate(store).await;
            build_router(AppState::new(config.clone(), controller, generator), sessions)
        }
        StoreConfig::File(path) => {
            tracing::info!(path = %path.display(), "Using data file store");
            let store: Arc<dyn StateStore> = Arc::new(FileStateStore::new(path.clone()));
            let controller = Controller::hydrate(store).await;
            build_router(
                AppState::new(config.clone(), controller, generator),
                MemoryStore::default(),
            )
        }
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("maruzzella listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Claude client for the briefing, or `None` when disabled.
fn briefing_generator(config: &ServerConfig) -> Option<Arc<dyn TextGenerator>> {
    let Some(claude) = &config.claude else {
        tracing::info!("CLAUDE_API_KEY not set; briefing disabled");
        return None;
    };

    match ClaudeClient::new(claude) {
        Ok(client) => {
            tracing::info!(model = %claude.model, "Briefing generator ready");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build Claude client; briefing disabled");
            None
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
