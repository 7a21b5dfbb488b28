//! Repository layer for transaction records
//!
//! The analytics engine talks to storage only through [`RecordRepository`].
//! Each storage technology gets its own adapter.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use crate::{
    config::{DatabaseConfig, StorageBackend},
    error::AppResult,
    models::Transaction,
    services::filter::TransactionFilter,
};

pub use memory::InMemoryTransactionsRepository;
pub use postgres::PgTransactionsRepository;

/// Numeric field that can be summed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Price,
}

/// Field that records can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Category,
}

/// Record order for `find`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// By id, i.e. insertion order
    #[default]
    Ascending,
}

/// Read access to stored transaction records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Count records matching the filter
    async fn count(&self, filter: &TransactionFilter) -> AppResult<i64>;

    /// Sum a numeric field over matching records (0 when nothing matches)
    async fn sum(&self, field: NumericField, filter: &TransactionFilter) -> AppResult<f64>;

    /// Matching records, skipping `skip` and returning at most `limit`
    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: i64,
        limit: i64,
        order: SortOrder,
    ) -> AppResult<Vec<Transaction>>;

    /// Matching record counts per distinct field value, ordered by value
    async fn group_count(
        &self,
        field: GroupField,
        filter: &TransactionFilter,
    ) -> AppResult<Vec<(String, i64)>>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Release underlying resources
    async fn close(&self);
}

/// Open the repository selected by the configuration
pub async fn open(config: &DatabaseConfig) -> AppResult<Arc<dyn RecordRepository>> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect(&config.url)
                .await?;

            tracing::info!("Connected to database");

            let repository = PgTransactionsRepository::new(pool);
            repository.migrate().await?;

            tracing::info!("Database migrations completed");

            Ok(Arc::new(repository))
        }
        StorageBackend::Memory => {
            let repository = match config.records_file {
                Some(ref path) => InMemoryTransactionsRepository::from_json_file(path)?,
                None => InMemoryTransactionsRepository::default(),
            };

            tracing::info!("Using in-memory store with {} records", repository.record_count());

            Ok(Arc::new(repository))
        }
    }
}
