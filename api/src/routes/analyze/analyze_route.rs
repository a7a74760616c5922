use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use language_analyzer::{AnalysisResult, LanguageAnalyzer};
use tokio::task;
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::request_id::incoming_request_id,
    routes::analyze::analyze_request::AnalyzeRequest,
};

/// `POST /api/v1/analyze`: per-language summary of a directory.
#[instrument(name = "analyze_route", skip_all)]
pub async fn analyze_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let request_id = incoming_request_id(&headers).unwrap_or("-");
    debug!(request_id = %request_id, directory = %body.directory, "analyze_route: start");

    match analyze(&state, body).await {
        Ok(result) => {
            debug!(
                request_id = %request_id,
                languages = ?result.languages_detected,
                total_files = result.total_files,
                "analyze_route: success"
            );
            ApiResponse::ok(result)
        }
        Err(err) => {
            debug!(request_id = %request_id, error = %err, "analyze_route: failed");
            err.into_response()
        }
    }
}

async fn analyze(state: &AppState, body: AnalyzeRequest) -> AppResult<AnalysisResult> {
    let directory = body.into_directory()?;
    let config = Arc::clone(&state.analyzer_config);

    // The walk is blocking filesystem I/O.
    let result = task::spawn_blocking(move || {
        LanguageAnalyzer::with_config(&directory, config)?.analyze()
    })
    .await??;

    Ok(result)
}
