//! Generic CRUD layer: one repository and one controller per record type,
//! mapped onto an axum router.

pub mod core;
pub mod entities;
pub mod repositories;
pub mod services;

pub use crate::core::{AppError, AppState, config};
pub use services::root;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Creates the application router
pub fn create_router(state: AppState) -> Router {
    let router = Router::new().route("/", get(root));
    let router = state.authors.register_routes(router, "/authors");
    let router = state.books.register_routes(router, "/books");

    router.layer(TraceLayer::new_for_http())
}
