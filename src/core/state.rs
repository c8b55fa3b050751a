//! Application State
//!
//! Holds one controller per record type served over HTTP. Every controller
//! wraps a repository built on the same connection pool.

use crate::entities::{Author, Book};
use crate::repositories::Repository;
use crate::services::Controller;
use sqlx::AnyPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// CRUD endpoints for authors
    pub authors: Arc<Controller<Author>>,

    /// CRUD endpoints for books
    pub books: Arc<Controller<Book>>,
}

impl AppState {
    /// Creates the controllers on top of the shared connection pool
    pub fn new(pool: AnyPool) -> Self {
        Self {
            authors: Arc::new(Controller::new(Repository::new(pool.clone()))),
            books: Arc::new(Controller::new(Repository::new(pool))),
        }
    }
}
