//! covidchart - COVID-19 cases per capita, served as a Highcharts spec
//!
//! Fetches a daily case table and a population table, pivots the cases into a
//! per-country, per-date matrix of rates, and serializes the result as a chart
//! configuration for a single web page.

pub mod api;
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::pipeline::ChartPipeline;
use axum::routing::{get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pipeline: Arc<ChartPipeline>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(api::page::home))
        .route("/chart", get(api::chart::get_chart))
        .route("/health", get(api::health::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
