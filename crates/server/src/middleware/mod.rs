//! HTTP middleware for the API.
//!
//! # Layers (outermost first)
//!
//! 1. Sentry (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//! 3. CORS (origins from `MARUZZELLA_ALLOWED_ORIGINS`)
//! 4. Session layer (tower-sessions; `PostgreSQL` or in-memory store)
//!
//! Authentication is an extractor ([`CurrentEmployee`]) rather than a layer,
//! so public routes need no special casing.

pub mod auth;
pub mod session;

pub use auth::{CurrentEmployee, clear_current_employee, set_current_employee};
pub use session::{SESSION_COOKIE_NAME, cors_layer, pg_session_store, session_layer};
