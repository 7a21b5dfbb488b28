//! API handlers for the sales analytics REST endpoints

pub mod analytics;
pub mod health;
pub mod openapi;
pub mod transactions;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::AnalyticsQuery, AppState};

/// Extractor for the analytics query string.
///
/// Malformed query strings (such as a repeated key) are reported as
/// `InvalidQuery` in the JSON error body instead of a plain-text rejection.
pub struct AnalyticsParams(pub AnalyticsQuery);

#[async_trait]
impl<S> FromRequestParts<S> for AnalyticsParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<AnalyticsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::InvalidQuery(rejection.body_text()))?;

        Ok(AnalyticsParams(query))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Transactions
        .route("/transactions", get(transactions::list_transactions))
        // Analytics
        .route("/statistics", get(analytics::get_statistics))
        .route("/bar-chart", get(analytics::get_bar_chart))
        .route("/pie-chart", get(analytics::get_pie_chart))
        .route("/combined-data", get(analytics::get_combined_data))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
