use std::{env, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse {var}: {source}")]
    InvalidNumber {
        var: &'static str,
        source: std::num::ParseIntError,
    },
}

/// Store connection parameters, loaded once at startup and injected into the
/// repository. There is no process-wide configuration singleton.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Connection string in the `key=value` format `tokio-postgres` expects.
    pub fn dsn(&self) -> String {
        let mut dsn = format!(
            "host={} port={} user={} dbname={}",
            self.host, self.port, self.user, self.database
        );
        if !self.password.is_empty() {
            dsn.push_str(&format!(" password={}", self.password));
        }
        dsn
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db: DbConfig,
    pub http_port: u16,
    pub debug: bool,
    pub query_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults suitable for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        let db = DbConfig {
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: parse_var("DB_PORT", 5432)?,
            user: env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            database: env::var("DB_NAME").unwrap_or_else(|_| "notesdb".to_string()),
        };

        Ok(Self {
            db,
            http_port: parse_var("HTTP_PORT", 5000)?,
            debug: env::var("DEBUG").is_ok_and(|v| v.eq_ignore_ascii_case("true")),
            query_timeout: Duration::from_millis(parse_var("DB_QUERY_TIMEOUT_MS", 5000)?),
        })
    }
}

fn parse_var<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|source| ConfigError::InvalidNumber { var, source }),
        Err(_) => Ok(default),
    }
}
