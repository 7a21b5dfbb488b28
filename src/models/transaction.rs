//! Transaction record model and query parameters

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// A product sale transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Sale price, never negative
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub sold: bool,
    /// Date of sale (YYYY-MM-DD); only the month is used for filtering
    #[serde(deserialize_with = "deserialize_sale_date")]
    pub date_of_sale: NaiveDate,
}

/// Accepts either a plain date or an RFC 3339 timestamp. Timestamps are
/// normalized to UTC before the calendar date is taken.
fn deserialize_sale_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_sale_date(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!("invalid dateOfSale '{}'", raw))
    })
}

pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc().date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}

/// Query string shared by the listing and analytics endpoints.
///
/// Values are kept as raw strings so that malformed input is reported through
/// the regular JSON error body rather than an extractor rejection.
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Month name ("March", "mar") or number (1-12). Required.
    pub month: Option<String>,
    /// Case-insensitive search in title, description and price
    pub search: Option<String>,
    /// Page number, 1-based (default: 1)
    pub page: Option<String>,
    /// Records per page (default: 10)
    pub per_page: Option<String>,
}
