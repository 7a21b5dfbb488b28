//! API integration tests
//!
//! Drives the full router over the in-memory store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use sales_analytics_server::{
    api::create_router,
    config::AppConfig,
    models::Transaction,
    repository::InMemoryTransactionsRepository,
    services::Services,
    AppState,
};

fn tx(
    id: i64,
    title: &str,
    price: f64,
    category: &str,
    sold: bool,
    date: (i32, u32, u32),
) -> Transaction {
    Transaction {
        id,
        title: title.to_string(),
        description: format!("Description of {}", title),
        price,
        category: category.to_string(),
        sold,
        date_of_sale: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
    }
}

/// Three March records (50 sold, 150 and 950 unsold) plus noise in other months
fn fixture() -> Vec<Transaction> {
    vec![
        tx(1, "Widget", 50.0, "electronics", true, (2021, 3, 2)),
        tx(2, "Silver Ring", 150.0, "jewelery", false, (2022, 3, 14)),
        tx(3, "Leather Jacket", 950.0, "men's clothing", false, (2021, 3, 27)),
        tx(4, "Monitor", 599.0, "electronics", true, (2021, 4, 1)),
        tx(5, "Backpack", 109.95, "men's clothing", false, (2022, 11, 27)),
    ]
}

fn app_with(records: Vec<Transaction>) -> Router {
    let config = AppConfig::default();
    let repository = Arc::new(InMemoryTransactionsRepository::from_records(records));
    let services = Services::new(repository, config.analytics.clone());

    create_router(AppState {
        services: Arc::new(services),
    })
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes).expect("Failed to parse response");
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(app_with(vec![]), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(app_with(vec![]), "/api/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_statistics_for_month() {
    let (status, body) = get(app_with(fixture()), "/api/statistics?month=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSale"].as_f64(), Some(1150.0));
    assert_eq!(body["soldItems"], 1);
    assert_eq!(body["unsoldItems"], 2);
}

#[tokio::test]
async fn test_statistics_for_empty_month_is_zero() {
    let (status, body) = get(app_with(fixture()), "/api/statistics?month=July").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalSale"].as_f64(), Some(0.0));
    assert_eq!(body["soldItems"], 0);
    assert_eq!(body["unsoldItems"], 0);
}

#[tokio::test]
async fn test_bar_chart_bands() {
    let (status, body) = get(app_with(fixture()), "/api/bar-chart?month=March").await;
    assert_eq!(status, StatusCode::OK);

    let bands = body.as_array().expect("bar chart is an array");
    let labels: Vec<&str> = bands.iter().map(|b| b["range"].as_str().unwrap()).collect();
    assert_eq!(
        labels,
        vec![
            "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700",
            "701-800", "801-900", "901-above"
        ]
    );

    let counts: Vec<i64> = bands.iter().map(|b| b["count"].as_i64().unwrap()).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
}

#[tokio::test]
async fn test_pie_chart_groups_by_category() {
    let (status, body) = get(app_with(fixture()), "/api/pie-chart?month=mar").await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().expect("pie chart is an array");
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e["count"] == 1));
    assert!(entries.iter().any(|e| e["category"] == "jewelery"));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let uri = "/api/transactions?month=3&search=widget";
    let (status, body) = get(app_with(fixture()), uri).await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["title"], "Widget");
    assert_eq!(records[0]["dateOfSale"], "2021-03-02");
}

#[tokio::test]
async fn test_search_matches_price_text() {
    let uri = "/api/transactions?month=11&search=109.9";
    let (_, body) = get(app_with(fixture()), uri).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 5);
}

#[tokio::test]
async fn test_second_page_returns_tail() {
    let uri = "/api/transactions?month=3&page=2&perPage=2";
    let (status, body) = get(app_with(fixture()), uri).await;
    assert_eq!(status, StatusCode::OK);

    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], 3);

    let (_, again) = get(app_with(fixture()), uri).await;
    assert_eq!(body, again);
}

#[tokio::test]
async fn test_combined_matches_standalone_endpoints() {
    let query = "month=March&search=e&page=1&perPage=2";
    let fetch = |path: &str| {
        let uri = format!("/api/{}?{}", path, query);
        async move { get(app_with(fixture()), &uri).await }
    };

    let (status, combined) = fetch("combined-data").await;
    assert_eq!(status, StatusCode::OK);

    let (_, transactions) = fetch("transactions").await;
    let (_, statistics) = fetch("statistics").await;
    let (_, bar_chart) = fetch("bar-chart").await;
    let (_, pie_chart) = fetch("pie-chart").await;

    assert_eq!(combined["transactions"], transactions);
    assert_eq!(combined["statistics"], statistics);
    assert_eq!(combined["barChart"], bar_chart);
    assert_eq!(combined["pieChart"], pie_chart);
}

#[tokio::test]
async fn test_missing_month_is_rejected() {
    let (status, body) = get(app_with(fixture()), "/api/statistics").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidQuery");
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    for uri in [
        "/api/bar-chart?month=Smarch",
        "/api/pie-chart?month=13",
        "/api/combined-data?month=",
    ] {
        let (status, body) = get(app_with(fixture()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "InvalidQuery", "{}", uri);
    }
}

#[tokio::test]
async fn test_invalid_pagination_is_rejected() {
    for uri in [
        "/api/transactions?month=3&page=abc",
        "/api/transactions?month=3&perPage=-2",
        "/api/combined-data?month=3&page=-1",
    ] {
        let (status, body) = get(app_with(fixture()), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "InvalidQuery", "{}", uri);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn test_repeated_query_key_is_rejected_as_json() {
    let (status, body) = get(app_with(fixture()), "/api/statistics?month=3&month=4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidQuery");
    assert_eq!(body["code"], 2);
    assert!(body["message"].is_string());
}
