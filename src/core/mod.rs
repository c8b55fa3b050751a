//! Core Module - infrastructure components of the application
//!
//! - Configuration
//! - Database pool
//! - Error handling
//! - Application state

pub mod config;
pub mod database;
pub mod error;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use state::AppState;
