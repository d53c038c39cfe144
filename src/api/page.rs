use crate::api::chart::pipeline_error_response;
use crate::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

const PAGE_TEMPLATE: &str = include_str!("../../templates/covid19.html");

/// Substitutes the `chart` context slot. `</` is escaped so the JSON cannot
/// close the surrounding script element.
pub fn render_page(chart_json: &str) -> String {
    PAGE_TEMPLATE.replace("{{ chart }}", &chart_json.replace("</", "<\\/"))
}

pub async fn home(State(app_state): State<AppState>) -> Response {
    match app_state.pipeline.chart_json().await {
        Ok(json) => Html(render_page(&json)).into_response(),
        Err(e) => pipeline_error_response(e),
    }
}
