//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{analytics, health, transactions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sales Analytics API",
        version = "0.1.0",
        description = "Transaction listing and monthly sales analytics REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Transactions
        transactions::list_transactions,
        // Analytics
        analytics::get_statistics,
        analytics::get_bar_chart,
        analytics::get_pie_chart,
        analytics::get_combined_data,
    ),
    components(
        schemas(
            crate::models::Transaction,
            crate::models::AnalyticsQuery,
            crate::models::Statistics,
            crate::models::PriceRangeCount,
            crate::models::CategoryCount,
            crate::models::CombinedData,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "transactions", description = "Transaction listing"),
        (name = "analytics", description = "Monthly statistics and charts")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
