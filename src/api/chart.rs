use crate::models::response::ApiResponse;
use crate::services::pipeline::PipelineError;
use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

pub async fn get_chart(State(app_state): State<AppState>) -> Response {
    match app_state.pipeline.chart_json().await {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(e) => pipeline_error_response(e),
    }
}

pub fn pipeline_error_response(e: PipelineError) -> Response {
    error!("Failed to build chart: {}", e);

    let status = if e.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ApiResponse::<()>::failure(format!("Failed to build chart: {}", e))),
    )
        .into_response()
}
