//! Router tests driving the view layer with `tower::ServiceExt::oneshot`.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use covidchart::config::Config;
use covidchart::services::pipeline::ChartPipeline;
use covidchart::{router, AppState};
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: Config) -> axum::Router {
    let pipeline = Arc::new(ChartPipeline::new(&config).unwrap());
    router(AppState {
        config: Arc::new(config),
        pipeline,
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health_lists_configured_countries() {
    let (status, body) = get(app(Config::default()), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["status"], "healthy");
    assert_eq!(value["countries"][0], "Korea, South");
    assert_eq!(value["countries"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_chart_endpoint_returns_chart_json() {
    let base = common::serve_fixtures().await;
    let (status, body) = get(app(common::config_for(&base, "population.csv")), "/chart").await;
    assert_eq!(status, StatusCode::OK);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["chart"]["type"], "spline");
    assert_eq!(value["series"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_home_page_embeds_chart() {
    let base = common::serve_fixtures().await;
    let (status, body) = get(app(common::config_for(&base, "population.csv")), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Highcharts.chart('container', {\"chart\":"));
    assert!(body.contains("\"name\":\"Korea, South\""));
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let base = common::serve_fixtures().await;
    let (status, body) = get(app(common::config_for(&base, "missing.csv")), "/chart").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["success"], false);
}

#[tokio::test]
async fn test_malformed_upstream_table_maps_to_bad_gateway() {
    let base = common::serve_fixtures().await;
    let mut config = common::config_for(&base, "population.csv");
    config.cases_url = format!("{}/malformed-cases.csv", base);
    let (status, _) = get(app(config), "/chart").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_missing_population_maps_to_server_error() {
    let base = common::serve_fixtures().await;
    let config = common::config_for(&base, "population-without-france.csv");
    let (status, _) = get(app(config), "/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
