use super::Config;
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use std::time::Duration;
use tracing::info;

/// Opens the connection pool shared by every repository
///
/// The backend (MySQL or SQLite) is picked from the `DATABASE_URL` scheme.
pub async fn connect(config: &Config) -> Result<AnyPool, sqlx::Error> {
    install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(config.connection_lifetime_secs))
        .connect(&config.database_url)
        .await?;

    info!("Database connection pool established");
    Ok(pool)
}
