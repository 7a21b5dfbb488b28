//! Analytics view models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::transaction::Transaction;

/// Sale statistics over every record matching a month and search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Sum of prices of matching records (0 when nothing matches)
    pub total_sale: f64,
    /// Number of matching records marked as sold
    pub sold_items: i64,
    /// Number of matching records not sold
    pub unsold_items: i64,
}

/// Record count for one price band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PriceRangeCount {
    /// Band label, e.g. "101-200" or "901-above"
    pub range: String,
    pub count: i64,
}

/// Record count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// All four views computed from one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    pub transactions: Vec<Transaction>,
    pub statistics: Statistics,
    pub bar_chart: Vec<PriceRangeCount>,
    pub pie_chart: Vec<CategoryCount>,
}
