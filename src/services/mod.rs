//! Services module - HTTP handlers
//!
//! The generic [`Controller`] serves the CRUD routes of every record type;
//! `root` answers the health check.

pub mod controller;

pub use controller::{
    Controller, create_handler, delete_handler, find_all_handler, find_by_id_handler,
    update_handler,
};

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}
