//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## State store (one of)
//! - `MARUZZELLA_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `MARUZZELLA_DATA_FILE` - JSON data file used when no database is configured
//!   (default: `server/data.json`)
//!
//! ## Optional
//! - `MARUZZELLA_HOST` - Bind address (default: 0.0.0.0)
//! - `MARUZZELLA_PORT` - Listen port (default: 4000)
//! - `MARUZZELLA_BASE_URL` - Public URL, decides secure cookies (default: `http://localhost:4000`)
//! - `MARUZZELLA_ALLOWED_ORIGINS` - Comma-separated CORS origins
//! - `CLAUDE_API_KEY` - Anthropic API key, enables the daily briefing
//! - `CLAUDE_MODEL` - Claude model ID (default: claude-sonnet-4-20250514)
//! - `SENTRY_DSN`, `SENTRY_ENVIRONMENT`, `SENTRY_SAMPLE_RATE`, `SENTRY_TRACES_SAMPLE_RATE`

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CLAUDE_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_DATA_FILE: &str = "server/data.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the authoritative state lives.
#[derive(Clone)]
pub enum StoreConfig {
    /// `PostgreSQL` `app_state` table.
    Postgres(SecretString),
    /// Pretty-printed JSON file on local disk.
    File(PathBuf),
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres(_) => f.write_str("Postgres([REDACTED])"),
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub store: StoreConfig,
    pub host: IpAddr,
    pub port: u16,
    /// Public base URL; `https://` turns on secure cookies.
    pub base_url: String,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
    /// Briefing generator; `None` disables it.
    pub claude: Option<ClaudeConfig>,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Claude API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ClaudeConfig {
    pub api_key: SecretString,
    pub model: String,
}

impl std::fmt::Debug for ClaudeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but malformed.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let store = match get("MARUZZELLA_DATABASE_URL").or_else(|| get("DATABASE_URL")) {
            Some(url) => StoreConfig::Postgres(SecretString::from(url)),
            None => StoreConfig::File(PathBuf::from(
                get("MARUZZELLA_DATA_FILE").unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            )),
        };

        let host = get("MARUZZELLA_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MARUZZELLA_HOST".to_string(), e.to_string()))?;
        let port = get("MARUZZELLA_PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MARUZZELLA_PORT".to_string(), e.to_string()))?;

        let base_url = get("MARUZZELLA_BASE_URL").unwrap_or_else(|| "http://localhost:4000".to_string());
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("MARUZZELLA_BASE_URL".to_string(), e.to_string()))?;

        let allowed_origins = get("MARUZZELLA_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .transpose()?
            .unwrap_or_default();

        let claude = get("CLAUDE_API_KEY").map(|key| ClaudeConfig {
            api_key: SecretString::from(key),
            model: get("CLAUDE_MODEL").unwrap_or_else(|| DEFAULT_CLAUDE_MODEL.to_string()),
        });

        Ok(Self {
            store,
            host,
            port,
            base_url,
            allowed_origins,
            claude,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get("SENTRY_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
            sentry_traces_sample_rate: get("SENTRY_TRACES_SAMPLE_RATE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1.0),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Configuration for router tests: file store at `path`, no generator.
    #[must_use]
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig::File(path.into()),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 4000,
            base_url: "http://localhost:4000".to_string(),
            allowed_origins: Vec::new(),
            claude: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

/// Split and validate a comma-separated origin list.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            let url = Url::parse(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("MARUZZELLA_ALLOWED_ORIGINS".to_string(), format!("{origin}: {e}"))
            })?;
            Ok(url.origin().ascii_serialization())
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_use_file_store() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert!(matches!(&config.store, StoreConfig::File(p) if p == &PathBuf::from("server/data.json")));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4000");
        assert!(!config.is_secure());
        assert!(config.claude.is_none());
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_database_url_fallback() {
        let config = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/mz")])).unwrap();
        assert!(matches!(config.store, StoreConfig::Postgres(_)));
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("MARUZZELLA_DATABASE_URL", "  "),
            ("CLAUDE_API_KEY", ""),
        ]))
        .unwrap();
        assert!(matches!(config.store, StoreConfig::File(_)));
        assert!(config.claude.is_none());
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(lookup(&[("MARUZZELLA_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(var, _) if var == "MARUZZELLA_PORT"));
    }

    #[test]
    fn test_allowed_origins_are_normalised() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "MARUZZELLA_ALLOWED_ORIGINS",
            "https://roster.maruzzella.example/, http://localhost:5173",
        )]))
        .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["https://roster.maruzzella.example", "http://localhost:5173"]
        );

        assert!(ServerConfig::from_lookup(lookup(&[("MARUZZELLA_ALLOWED_ORIGINS", "not a url")])).is_err());
    }

    #[test]
    fn test_claude_model_default() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CLAUDE_API_KEY", "sk-ant-REDACTED"),
            ("MARUZZELLA_BASE_URL", "https://roster.maruzzella.example"),
        ]))
        .unwrap();
        assert_eq!(config.claude.as_ref().unwrap().model, DEFAULT_CLAUDE_MODEL);
        assert!(config.is_secure());
    }

    #[test]
    fn test_claude_key_is_taken_as_issued() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CLAUDE_API_KEY", "aaaaaaaa"),
            ("CLAUDE_MODEL", "claude-haiku"),
        ]))
        .unwrap();
        let claude = config.claude.unwrap();
        assert_eq!(claude.api_key.expose_secret(), "aaaaaaaa");
        assert_eq!(claude.model, "claude-haiku");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = ServerConfig {
            store: StoreConfig::Postgres(SecretString::from("postgres://u:hunter2@db/mz")),
            claude: Some(ClaudeConfig {
                api_key: SecretString::from("sk-ant-secret"),
                model: DEFAULT_CLAUDE_MODEL.to_string(),
            }),
            ..ServerConfig::for_file("unused.json")
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
