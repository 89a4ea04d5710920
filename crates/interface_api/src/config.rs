//! API configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/catalog";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Upper bound of the connection pool
    pub max_connections: u32,
    /// Apply pending migrations at start-up
    pub run_migrations: bool,
    /// Seed an empty catalog at start-up
    pub seed_data: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_level: "info".to_string(),
            max_connections: 10,
            run_migrations: true,
            seed_data: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `DATABASE_URL` is used when `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        Self::load(Environment::with_prefix("API"), database_url)
    }

    fn load(environment: Environment, database_url: String) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .set_default("run_migrations", defaults.run_migrations)?
            .set_default("seed_data", defaults.seed_data)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
