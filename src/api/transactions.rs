//! Transaction listing endpoint

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::{AnalyticsQuery, Transaction},
    AppState,
};

use super::AnalyticsParams;

/// List transactions of a month, with search and pagination
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Page of matching transactions", body = Vec<Transaction>),
        (status = 400, description = "Invalid query", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    AnalyticsParams(query): AnalyticsParams,
) -> AppResult<Json<Vec<Transaction>>> {
    let analytics = &state.services.analytics;
    let resolved = analytics.resolve_query(&query)?;

    let transactions = analytics
        .list_transactions(&resolved.filter, resolved.pagination)
        .await?;
    Ok(Json(transactions))
}
