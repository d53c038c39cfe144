use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};

pub async fn health(State(app_state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let countries: Vec<&str> = app_state
        .config
        .countries
        .iter()
        .map(|c| c.case_name.as_str())
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "healthy", "countries": countries })),
    )
}
