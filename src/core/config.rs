use dotenv::dotenv;
use std::env;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL must be set in the environment or .env file")]
    MissingDatabaseUrl,

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: &'static str },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
}

impl Config {
    /// Loads the configuration from environment variables
    /// Calls dotenv() first, so a `.env` file in the working directory is honoured
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                reason: "must be a number between 0-65535",
            })?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::Invalid {
                name: "MAX_DB_CONNECTIONS",
                reason: "must be a positive number",
            })?;

        let connection_lifetime_secs = env::var("DB_CONNECTION_LIFETIME_SECS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::Invalid {
                name: "DB_CONNECTION_LIFETIME_SECS",
                reason: "must be a positive number",
            })?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            app_env,
        })
    }

    /// Logs the configuration, masking database credentials
    pub fn log_info(&self) {
        info!(
            env = %self.app_env,
            address = %format!("{}:{}", self.server_host, self.server_port),
            database = %Self::mask_url(&self.database_url),
            max_connections = self.max_connections,
            connection_lifetime_secs = self.connection_lifetime_secs,
            "Server configuration"
        );
        if self.database_url.starts_with("sqlite::memory:") {
            warn!("In-memory database: data is lost on shutdown");
        }
    }

    /// Masks the credentials part of a database URL
    fn mask_url(url: &str) -> String {
        if let (Some(scheme_end), Some(at_pos)) = (url.find("://"), url.rfind('@')) {
            if at_pos > scheme_end {
                return format!("{}***{}", &url[..scheme_end + 3], &url[at_pos..]);
            }
        }
        if url.starts_with("sqlite:") {
            return url.to_string();
        }
        "***".to_string()
    }
}
