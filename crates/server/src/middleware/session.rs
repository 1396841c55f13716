//! Session and CORS layer configuration.

use axum::http::{HeaderValue, Method, header};
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "mz_session";

/// Idle time after which a PIN login expires (12 hours, one long shift).
const SESSION_EXPIRY_SECONDS: i64 = 12 * 60 * 60;

/// `PostgreSQL` session store in the `maruzzella.session` table.
///
/// The table is created by the server migrations.
///
/// # Errors
///
/// Returns an error if the schema or table name is rejected.
pub fn pg_session_store(pool: &PgPool) -> Result<PostgresStore, sqlx::Error> {
    PostgresStore::new(pool.clone())
        .with_schema_name("maruzzella")
        .map_err(|e| sqlx::Error::Configuration(e.to_string().into()))?
        .with_table_name("session")
        .map_err(|e| sqlx::Error::Configuration(e.to_string().into()))
}

/// Create the session layer over any session store.
#[must_use]
pub fn session_layer<S>(store: S, config: &ServerConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// CORS for the configured browser origins. No origins means same-origin only.
#[must_use]
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
