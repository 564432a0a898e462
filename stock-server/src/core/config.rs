use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::ServerError;
use crate::inventory::{FallbackPolicy, RetryPolicy};

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory |
/// | DATABASE_PATH | {WORK_DIR}/stock.db | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | Level or filter directive |
/// | LOG_DIR | (console) | Daily-rolling log file directory |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | STOCK_RETRY_ATTEMPTS | 3 | Attempts for a write that hit the SQLite lock |
/// | STOCK_RETRY_BACKOFF_MS | 25 | Linear backoff step between attempts |
/// | STOCK_FALLBACK_POLICY | even_split | `even_split` or `zero` |
/// | JWT_SECRET, JWT_ISSUER, JWT_AUDIENCE, JWT_EXPIRATION_MINUTES | | See [`JwtConfig`] |
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub stock_retry: RetryPolicy,
    pub stock_fallback_policy: FallbackPolicy,
    pub jwt: JwtConfig,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH").unwrap_or_else(|_| {
            PathBuf::from(&work_dir)
                .join("stock.db")
                .to_string_lossy()
                .into_owned()
        });

        let stock_fallback_policy = match std::env::var("STOCK_FALLBACK_POLICY") {
            Ok(raw) => raw.parse::<FallbackPolicy>().map_err(ServerError::Config)?,
            Err(_) => FallbackPolicy::default(),
        };
        let defaults = RetryPolicy::default();

        Ok(Self {
            jwt: JwtConfig::from_env(environment == "production")?,
            work_dir,
            database_path,
            http_port: env_or("HTTP_PORT", 3000),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            stock_retry: RetryPolicy {
                max_attempts: env_or("STOCK_RETRY_ATTEMPTS", defaults.max_attempts),
                base_backoff_ms: env_or("STOCK_RETRY_BACKOFF_MS", defaults.base_backoff_ms),
            },
            stock_fallback_policy,
            environment,
        })
    }

    /// Configuration for tests: in-process values, nothing read from the
    /// environment
    pub fn for_tests(jwt: JwtConfig) -> Self {
        Self {
            work_dir: ".".into(),
            database_path: ":memory:".into(),
            http_port: 0,
            environment: "test".into(),
            log_level: "info".into(),
            log_dir: None,
            request_timeout_ms: 30_000,
            stock_retry: RetryPolicy::default(),
            stock_fallback_policy: FallbackPolicy::default(),
            jwt,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
