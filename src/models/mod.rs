//! Data models for the sales analytics server

pub mod analytics;
pub mod transaction;

// Re-export commonly used types
pub use analytics::{CategoryCount, CombinedData, PriceRangeCount, Statistics};
pub use transaction::{AnalyticsQuery, Transaction};
