//! In-memory transactions repository
//!
//! Holds an immutable collection of records, the way a document store keeps a
//! collection, and evaluates filters in process.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::{AppError, AppResult},
    models::Transaction,
    services::filter::TransactionFilter,
};

use super::{GroupField, NumericField, RecordRepository, SortOrder};

#[derive(Clone, Default)]
pub struct InMemoryTransactionsRepository {
    records: Arc<Vec<Transaction>>,
}

impl InMemoryTransactionsRepository {
    /// Build a store from records, kept in id order
    pub fn from_records(mut records: Vec<Transaction>) -> Self {
        records.sort_by_key(|r| r.id);
        Self {
            records: Arc::new(records),
        }
    }

    /// Load a JSON array of records from a local file
    pub fn from_json_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Repository(format!("cannot read {}: {}", path.display(), e))
        })?;
        let records: Vec<Transaction> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Repository(format!("invalid records in {}: {}", path.display(), e))
        })?;

        if let Some(bad) = records.iter().find(|r| r.price < 0.0 || !r.price.is_finite()) {
            return Err(AppError::Repository(format!(
                "record {} has an invalid price {}",
                bad.id, bad.price
            )));
        }

        Ok(Self::from_records(records))
    }

    /// Number of records held
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    fn matching<'a>(
        &'a self,
        filter: &'a TransactionFilter,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        self.records.iter().filter(move |r| filter.matches(r))
    }
}

#[async_trait]
impl RecordRepository for InMemoryTransactionsRepository {
    async fn count(&self, filter: &TransactionFilter) -> AppResult<i64> {
        Ok(self.matching(filter).count() as i64)
    }

    async fn sum(&self, field: NumericField, filter: &TransactionFilter) -> AppResult<f64> {
        let total = match field {
            NumericField::Price => self.matching(filter).map(|r| r.price).sum(),
        };
        Ok(total)
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: i64,
        limit: i64,
        order: SortOrder,
    ) -> AppResult<Vec<Transaction>> {
        let skip = usize::try_from(skip).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        // Records are kept sorted by id
        let page = match order {
            SortOrder::Ascending => self
                .matching(filter)
                .skip(skip)
                .take(limit)
                .cloned()
                .collect(),
        };
        Ok(page)
    }

    async fn group_count(
        &self,
        field: GroupField,
        filter: &TransactionFilter,
    ) -> AppResult<Vec<(String, i64)>> {
        let mut groups: BTreeMap<&str, i64> = BTreeMap::new();
        for record in self.matching(filter) {
            let key = match field {
                GroupField::Category => record.category.as_str(),
            };
            *groups.entry(key).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    async fn close(&self) {}
}
