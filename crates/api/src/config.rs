//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;

/// Shortest accepted token signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Longest accepted token validity window: ten years.
pub const MAX_TOKEN_TTL_HOURS: i64 = 10 * 365 * 24;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// HMAC secret used to sign bearer tokens.
    pub jwt_secret: String,
    /// How long an issued token stays valid.
    pub token_ttl: chrono::Duration,
    /// Browser origin allowed by CORS.
    pub cors_origin: String,
    /// Upper bound on one AI completion call.
    pub ai_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `API_ADDR` | Server bind address | `127.0.0.1:8080` |
    /// | `SQLITE_PATH` | SQLite database URL | `sqlite:adya.db?mode=rwc` |
    /// | `JWT_SECRET` | Token signing secret, at least 32 bytes | (required) |
    /// | `TOKEN_TTL_HOURS` | Token validity window, at most ten years | `72` |
    /// | `CORS_ORIGIN` | Allowed browser origin | `http://localhost:5173` |
    /// | `AI_TIMEOUT_SECS` | Timeout for one completion call, non-zero | `30` |
    ///
    /// The Gemini backend reads its own `GEMINI_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("API_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = env::var("SQLITE_PATH")
            .unwrap_or_else(|_| "sqlite:adya.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?;
        if jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakJwtSecret);
        }

        let token_ttl_hours = parse_var("TOKEN_TTL_HOURS", 72i64)?;
        let token_ttl = Some(token_ttl_hours)
            .filter(|hours| (1..=MAX_TOKEN_TTL_HOURS).contains(hours))
            .and_then(chrono::Duration::try_hours)
            .ok_or(ConfigError::InvalidNumber("TOKEN_TTL_HOURS"))?;

        let cors_origin = env::var("CORS_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let ai_timeout_secs = parse_var("AI_TIMEOUT_SECS", 30u64)?;
        if ai_timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber("AI_TIMEOUT_SECS"));
        }

        Ok(Self {
            addr,
            database_url,
            jwt_secret,
            token_ttl,
            cors_origin,
            ai_timeout: Duration::from_secs(ai_timeout_secs),
        })
    }

    /// CORS policy for the configured browser origin.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        let origin: HeaderValue = self
            .cors_origin
            .parse()
            .map_err(|_| ConfigError::InvalidCorsOrigin)?;

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([
                header::ORIGIN,
                header::CONTENT_TYPE,
                header::ACCEPT,
                header::AUTHORIZATION,
            ]))
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid API_ADDR format")]
    InvalidAddr,

    #[error("JWT_SECRET environment variable is required")]
    MissingJwtSecret,

    #[error("JWT_SECRET must be at least 32 bytes")]
    WeakJwtSecret,

    #[error("{0} must be a positive number within the allowed range")]
    InvalidNumber(&'static str),

    #[error("Invalid CORS_ORIGIN")]
    InvalidCorsOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so every scenario runs in one test.
    #[test]
    fn test_from_env_scenarios() {
        fn clear_vars() {
            for var in [
                "API_ADDR",
                "SQLITE_PATH",
                "JWT_SECRET",
                "TOKEN_TTL_HOURS",
                "CORS_ORIGIN",
                "AI_TIMEOUT_SECS",
            ] {
                std::env::remove_var(var);
            }
        }

        // Secret is required
        clear_vars();
        assert!(matches!(Config::from_env(), Err(ConfigError::MissingJwtSecret)));

        std::env::set_var("JWT_SECRET", "short");
        assert!(matches!(Config::from_env(), Err(ConfigError::WeakJwtSecret)));

        // Defaults
        std::env::set_var("JWT_SECRET", "x".repeat(MIN_JWT_SECRET_LEN));
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.database_url, "sqlite:adya.db?mode=rwc");
        assert_eq!(config.token_ttl, chrono::Duration::hours(72));
        assert_eq!(config.cors_origin, "http://localhost:5173");
        assert_eq!(config.ai_timeout, Duration::from_secs(30));
        assert!(config.cors_layer().is_ok());

        // Overrides
        std::env::set_var("API_ADDR", "0.0.0.0:9000");
        std::env::set_var("TOKEN_TTL_HOURS", "1");
        std::env::set_var("AI_TIMEOUT_SECS", "5");
        let config = Config::from_env().unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.token_ttl, chrono::Duration::hours(1));
        assert_eq!(config.ai_timeout, Duration::from_secs(5));

        // Bad values
        std::env::set_var("TOKEN_TTL_HOURS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidNumber("TOKEN_TTL_HOURS"))
        ));
        for hours in ["87601", "10000000000", "3000000000000000", "-5"] {
            std::env::set_var("TOKEN_TTL_HOURS", hours);
            assert!(
                matches!(
                    Config::from_env(),
                    Err(ConfigError::InvalidNumber("TOKEN_TTL_HOURS"))
                ),
                "{hours} should be rejected"
            );
        }
        std::env::set_var("TOKEN_TTL_HOURS", MAX_TOKEN_TTL_HOURS.to_string());
        assert_eq!(
            Config::from_env().unwrap().token_ttl,
            chrono::Duration::hours(MAX_TOKEN_TTL_HOURS)
        );
        std::env::set_var("TOKEN_TTL_HOURS", "72");

        std::env::set_var("AI_TIMEOUT_SECS", "0");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::InvalidNumber("AI_TIMEOUT_SECS"))
        ));
        std::env::set_var("AI_TIMEOUT_SECS", "5");

        std::env::set_var("API_ADDR", "not an address");
        assert!(matches!(Config::from_env(), Err(ConfigError::InvalidAddr)));

        clear_vars();
    }
}
