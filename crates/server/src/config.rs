//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHIPTRACK_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `SHIPTRACK_HOST` - Bind address (default: 127.0.0.1)
//! - `SHIPTRACK_PORT` - Listen port (default: 8080)
//! - `SHIPTRACK_BASE_URL` - Public URL (default: <http://localhost:8080>); `https://` enables secure cookies
//! - `SHIPTRACK_CORS_ORIGINS` - Comma-separated browser origins (default: <http://localhost:5173>)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the API
    pub base_url: String,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced in Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("SHIPTRACK_DATABASE_URL")
            .or_else(|| lookup("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("SHIPTRACK_DATABASE_URL".to_string()))?;

        let host = parse_var(&lookup, "SHIPTRACK_HOST", "127.0.0.1")?;
        let port = parse_var(&lookup, "SHIPTRACK_PORT", "8080")?;
        let base_url =
            lookup("SHIPTRACK_BASE_URL").unwrap_or_else(|| "http://localhost:8080".to_string());
        let cors_origins = parse_origins(
            &lookup("SHIPTRACK_CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        );
        let json_logs = lookup("LOG_FORMAT").is_some_and(|v| v.eq_ignore_ascii_case("json"));

        let sentry_sample_rate = parse_rate(&lookup, "SENTRY_SAMPLE_RATE", "1.0")?;
        let sentry_traces_sample_rate = parse_rate(&lookup, "SENTRY_TRACES_SAMPLE_RATE", "0.0")?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            cors_origins,
            json_logs,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies must be marked `Secure`.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable with a default, reporting the variable name on failure.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sampling rate and check it lies in `0.0..=1.0`.
fn parse_rate(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<f32, ConfigError> {
    let rate: f32 = parse_var(lookup, key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_missing_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "SHIPTRACK_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = config_from(&[("DATABASE_URL", "postgres://fly/db")]).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fly/db");

        let config = config_from(&[
            ("DATABASE_URL", "postgres://fly/db"),
            ("SHIPTRACK_DATABASE_URL", "postgres://local/db"),
        ])
        .unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://local/db");
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("SHIPTRACK_DATABASE_URL", "postgres://x")]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert!(!config.json_logs);
        assert!(!config.secure_cookies());
        assert!(config.sentry_dsn.is_none());
        assert!((config.sentry_sample_rate - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[
            ("SHIPTRACK_DATABASE_URL", "postgres://x"),
            ("SHIPTRACK_PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref k, _) if k == "SHIPTRACK_PORT"));
    }

    #[test]
    fn test_sample_rate_out_of_range() {
        let err = config_from(&[
            ("SHIPTRACK_DATABASE_URL", "postgres://x"),
            ("SENTRY_TRACES_SAMPLE_RATE", "1.5"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_origins_are_split_and_trimmed() {
        assert_eq!(
            parse_origins(" http://localhost:5173/ , ,http://192.168.1.14:5173"),
            vec!["http://localhost:5173", "http://192.168.1.14:5173"]
        );
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = config_from(&[("SHIPTRACK_DATABASE_URL", "postgres://u:hunter2@db/x")]).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
