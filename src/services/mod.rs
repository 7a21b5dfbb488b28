//! Business logic services

pub mod analytics;
pub mod filter;
pub mod month;
pub mod pagination;
pub mod price_band;

use std::sync::Arc;

use crate::{config::AnalyticsConfig, repository::RecordRepository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub analytics: analytics::AnalyticsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Arc<dyn RecordRepository>, analytics_config: AnalyticsConfig) -> Self {
        Self {
            analytics: analytics::AnalyticsService::new(repository, analytics_config),
        }
    }
}
