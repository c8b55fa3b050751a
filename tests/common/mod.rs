#![allow(dead_code)]

use axum_test::TestServer;
use crudstack::AppState;
use crudstack::entities::SQLITE_SCHEMA;
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};

/// Opens an in-memory SQLite pool without any table
///
/// # Returns
/// Pool with a single long-lived connection, so every query sees the same database
pub async fn create_empty_pool() -> AnyPool {
    install_default_drivers();
    AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database")
}

/// Opens an in-memory SQLite pool with the authors/books schema
pub async fn create_test_pool() -> AnyPool {
    let pool = create_empty_pool().await;
    for statement in SQLITE_SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to create schema");
    }
    pool
}

/// Creates a TestServer for the tests
///
/// # Arguments
/// * `pool` - Connection pool backing every repository
///
/// # Returns
/// TestServer configured and ready to run requests
pub fn create_test_server(pool: AnyPool) -> TestServer {
    let app = crudstack::create_router(AppState::new(pool));
    TestServer::new(app).expect("Failed to create test server")
}
