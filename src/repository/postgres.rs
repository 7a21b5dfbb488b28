//! PostgreSQL transactions repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{
    error::{AppError, AppResult},
    models::Transaction,
    services::filter::TransactionFilter,
};

use super::{GroupField, NumericField, RecordRepository, SortOrder};

const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale";

#[derive(Clone)]
pub struct PgTransactionsRepository {
    pool: Pool<Postgres>,
}

impl PgTransactionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations (creates the `transactions` table)
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Repository(format!("migration failed: {}", e)))
    }
}

impl NumericField {
    fn column(self) -> &'static str {
        match self {
            NumericField::Price => "price",
        }
    }
}

impl GroupField {
    fn column(self) -> &'static str {
        match self {
            GroupField::Category => "category",
        }
    }
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
        }
    }
}

/// Escape LIKE wildcards so the search term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Append the WHERE clause for a filter; every value is bound, never inlined.
fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &TransactionFilter) {
    builder
        .push(" WHERE EXTRACT(MONTH FROM date_of_sale)::int = ")
        .push_bind(filter.month.number() as i32);

    if let Some(sold) = filter.sold {
        builder.push(" AND sold = ").push_bind(sold);
    }

    if let Some(range) = filter.price {
        if let Some(lower) = range.greater_than {
            builder.push(" AND price > ").push_bind(lower);
        }
        if let Some(upper) = range.at_most {
            builder.push(" AND price <= ").push_bind(upper);
        }
    }

    if let Some(ref term) = filter.search {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR price::text ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[async_trait]
impl RecordRepository for PgTransactionsRepository {
    async fn count(&self, filter: &TransactionFilter) -> AppResult<i64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM transactions");
        push_filter(&mut builder, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn sum(&self, field: NumericField, filter: &TransactionFilter) -> AppResult<f64> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT COALESCE(SUM({}), 0)::float8 FROM transactions",
            field.column()
        ));
        push_filter(&mut builder, filter);

        let total: f64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(total)
    }

    async fn find(
        &self,
        filter: &TransactionFilter,
        skip: i64,
        limit: i64,
        order: SortOrder,
    ) -> AppResult<Vec<Transaction>> {
        let mut builder =
            QueryBuilder::new(format!("SELECT {} FROM transactions", TRANSACTION_COLUMNS));
        push_filter(&mut builder, filter);
        builder
            .push(format!(" ORDER BY id {}", order.keyword()))
            .push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(skip);

        let rows = builder
            .build_query_as::<Transaction>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn group_count(
        &self,
        field: GroupField,
        filter: &TransactionFilter,
    ) -> AppResult<Vec<(String, i64)>> {
        let column = field.column();
        let mut builder = QueryBuilder::new(format!(
            "SELECT {}, COUNT(*) FROM transactions",
            column
        ));
        push_filter(&mut builder, filter);
        // Byte-order collation keeps ordering identical to the in-memory store
        builder.push(format!(
            " GROUP BY {c} ORDER BY {c} COLLATE \"C\"",
            c = column
        ));

        let rows = builder
            .build_query_as::<(String, i64)>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
