//! Monthly analytics endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{AnalyticsQuery, CategoryCount, CombinedData, PriceRangeCount, Statistics},
    AppState,
};

use super::AnalyticsParams;

/// Sale statistics for a month
#[utoipa::path(
    get,
    path = "/statistics",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Total sale value and sold/unsold counts", body = Statistics),
        (status = 400, description = "Invalid month", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_statistics(
    State(state): State<AppState>,
    AnalyticsParams(query): AnalyticsParams,
) -> AppResult<Json<Statistics>> {
    let analytics = &state.services.analytics;
    let resolved = analytics.resolve_query(&query)?;

    let stats = analytics.statistics(&resolved.filter).await?;
    Ok(Json(stats))
}

/// Price range histogram for a month
#[utoipa::path(
    get,
    path = "/bar-chart",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Counts per price band", body = Vec<PriceRangeCount>),
        (status = 400, description = "Invalid month", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_bar_chart(
    State(state): State<AppState>,
    AnalyticsParams(query): AnalyticsParams,
) -> AppResult<Json<Vec<PriceRangeCount>>> {
    let analytics = &state.services.analytics;
    let resolved = analytics.resolve_query(&query)?;

    let chart = analytics.bar_chart(&resolved.filter).await?;
    Ok(Json(chart))
}

/// Category breakdown for a month
#[utoipa::path(
    get,
    path = "/pie-chart",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Record count per category", body = Vec<CategoryCount>),
        (status = 400, description = "Invalid month", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_pie_chart(
    State(state): State<AppState>,
    AnalyticsParams(query): AnalyticsParams,
) -> AppResult<Json<Vec<CategoryCount>>> {
    let analytics = &state.services.analytics;
    let resolved = analytics.resolve_query(&query)?;

    let chart = analytics.pie_chart(&resolved.filter).await?;
    Ok(Json(chart))
}

/// Transactions, statistics, bar chart and pie chart in one response
#[utoipa::path(
    get,
    path = "/combined-data",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "All views for the query", body = CombinedData),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse),
        (status = 500, description = "One of the views failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_combined_data(
    State(state): State<AppState>,
    AnalyticsParams(query): AnalyticsParams,
) -> AppResult<Json<CombinedData>> {
    let analytics = &state.services.analytics;
    let resolved = analytics.resolve_query(&query)?;

    tracing::debug!(month = %resolved.filter.month, "Computing combined data");
    let data = analytics.combined(&resolved).await?;
    Ok(Json(data))
}
