//! Repositories module - generic persistence layer
//!
//! A single [`Repository`] implementation serves every record type implementing
//! [`Entity`]. All repositories share one `AnyPool`, so the same code runs
//! against MySQL in production and SQLite in tests.
//!
//! Statements are assembled with `sqlx::QueryBuilder` and `?` placeholders;
//! table and column names come from the `Entity` constants, never from
//! request data.

pub mod error;
pub mod preload;
pub mod repository;
pub mod traits;

pub use error::RepositoryError;
pub use preload::{load_by_foreign_key, load_by_ids};
pub use repository::Repository;
pub use traits::{Entity, Value};

/// In-memory SQLite pool with the demo schema, for unit tests
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::AnyPool {
    use sqlx::any::{AnyPoolOptions, install_default_drivers};

    install_default_drivers();
    // Every connection to `sqlite::memory:` is its own database: keep exactly one alive.
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    for statement in crate::entities::SQLITE_SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to create schema");
    }
    pool
}
