//! Environment-driven configuration.

use std::env;
use std::str::FromStr;

use quill_infra::database::DatabaseConfig;

fn var_or<T: FromStr>(name: &str, fallback: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

/// Server settings. A missing `DATABASE_URL` selects the in-memory
/// repositories instead of PostgreSQL.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: var_or("DB_MAX_CONNECTIONS", 100),
            min_connections: var_or("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: var_or("PORT", 8080),
            database,
        }
    }
}
