//! Sales Analytics Server
//!
//! Serves product sale transactions through a REST JSON API: paginated,
//! searchable monthly listings plus statistics, a price histogram and a
//! category breakdown for the selected month.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use std::sync::Arc;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
