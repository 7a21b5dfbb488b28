//! Transaction listing and monthly analytics service

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;

use crate::{
    config::AnalyticsConfig,
    error::{AppError, AppResult},
    models::{
        AnalyticsQuery, CategoryCount, CombinedData, PriceRangeCount, Statistics, Transaction,
    },
    repository::{GroupField, NumericField, RecordRepository, SortOrder},
};

use super::{
    filter::TransactionFilter, month::Month, pagination::Pagination, price_band::PRICE_BANDS,
};

/// A query string turned into a filter and a page request
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedQuery {
    pub filter: TransactionFilter,
    pub pagination: Pagination,
}

#[derive(Clone)]
pub struct AnalyticsService {
    repository: Arc<dyn RecordRepository>,
    config: AnalyticsConfig,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn RecordRepository>, config: AnalyticsConfig) -> Self {
        Self { repository, config }
    }

    /// Validate the raw query parameters.
    ///
    /// `month` is required; `page` and `perPage` must be non-negative integers.
    /// Zero values are clamped by [`Pagination`].
    pub fn resolve_query(&self, query: &AnalyticsQuery) -> AppResult<ResolvedQuery> {
        let month = query
            .month
            .as_deref()
            .ok_or_else(|| AppError::InvalidQuery("month is required".to_string()))?;
        let month = Month::resolve(month)?;

        let page = parse_count("page", query.page.as_deref())?.unwrap_or(1);
        let per_page = parse_count("perPage", query.per_page.as_deref())?
            .unwrap_or(self.config.default_per_page);

        Ok(ResolvedQuery {
            filter: TransactionFilter::new(month, query.search.as_deref()),
            pagination: Pagination::new(page, per_page, self.config.max_per_page),
        })
    }

    /// Page of matching transactions, in insertion order
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        pagination: Pagination,
    ) -> AppResult<Vec<Transaction>> {
        tracing::debug!(
            month = %filter.month,
            page = pagination.page,
            per_page = pagination.per_page,
            "Listing transactions"
        );
        self.bounded(self.repository.find(
            filter,
            pagination.offset(),
            pagination.limit(),
            SortOrder::Ascending,
        ))
        .await
    }

    /// Total sale value and sold/unsold counts over every matching record
    pub async fn statistics(&self, filter: &TransactionFilter) -> AppResult<Statistics> {
        let sold_filter = filter.clone().with_sold(true);
        let unsold_filter = filter.clone().with_sold(false);

        let (total_sale, sold_items, unsold_items) = tokio::try_join!(
            self.bounded(self.repository.sum(NumericField::Price, filter)),
            self.bounded(self.repository.count(&sold_filter)),
            self.bounded(self.repository.count(&unsold_filter)),
        )?;

        Ok(Statistics {
            total_sale,
            sold_items,
            unsold_items,
        })
    }

    /// Record counts for each price band, in ascending band order.
    /// Bands are counted concurrently, one repository call each.
    pub async fn bar_chart(&self, filter: &TransactionFilter) -> AppResult<Vec<PriceRangeCount>> {
        let mut tasks = JoinSet::new();
        for (idx, band) in PRICE_BANDS.iter().enumerate() {
            let service = self.clone();
            let band_filter = filter.clone().with_price_range(band.price_range());
            tasks.spawn(async move {
                let count = service
                    .bounded(service.repository.count(&band_filter))
                    .await?;
                Ok::<_, AppError>((idx, count))
            });
        }

        let mut counts = vec![0_i64; PRICE_BANDS.len()];
        while let Some(joined) = tasks.join_next().await {
            let (idx, count) = joined
                .map_err(|e| AppError::Internal(format!("bar chart task failed: {}", e)))??;
            counts[idx] = count;
        }

        Ok(PRICE_BANDS
            .iter()
            .zip(counts)
            .map(|(band, count)| PriceRangeCount {
                range: band.label(),
                count,
            })
            .collect())
    }

    /// Record counts per category; categories without matches are omitted
    pub async fn pie_chart(&self, filter: &TransactionFilter) -> AppResult<Vec<CategoryCount>> {
        let groups = self
            .bounded(self.repository.group_count(GroupField::Category, filter))
            .await?;

        Ok(groups
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    /// All four views for one query, computed concurrently.
    /// The first failing view fails the whole call.
    pub async fn combined(&self, query: &ResolvedQuery) -> AppResult<CombinedData> {
        let filter = &query.filter;

        let (transactions, statistics, bar_chart, pie_chart) = tokio::try_join!(
            self.list_transactions(filter, query.pagination),
            self.statistics(filter),
            self.bar_chart(filter),
            self.pie_chart(filter),
        )
        .map_err(|e| AppError::CombinedFailure(Box::new(e)))?;

        Ok(CombinedData {
            transactions,
            statistics,
            bar_chart,
            pie_chart,
        })
    }

    /// Check repository reachability
    pub async fn ping(&self) -> AppResult<()> {
        self.bounded(self.repository.ping()).await
    }

    /// Run a repository call under the configured timeout
    async fn bounded<T>(&self, call: impl Future<Output = AppResult<T>>) -> AppResult<T> {
        let limit = self.config.query_timeout_ms;
        tokio::time::timeout(Duration::from_millis(limit), call)
            .await
            .map_err(|_| AppError::RepositoryTimeout(limit))?
    }
}

fn parse_count(name: &str, raw: Option<&str>) -> AppResult<Option<u32>> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    match raw.parse::<i64>() {
        Ok(value) if value < 0 => Err(AppError::InvalidQuery(format!(
            "{} must not be negative",
            name
        ))),
        Ok(value) => Ok(Some(u32::try_from(value).unwrap_or(u32::MAX))),
        Err(_) => Err(AppError::InvalidQuery(format!(
            "{} must be an integer, got '{}'",
            name, raw
        ))),
    }
}
