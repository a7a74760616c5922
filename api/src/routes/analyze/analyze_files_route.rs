use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use language_analyzer::{FilesByLanguage, LanguageAnalyzer};
use tokio::task;
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
    middleware_layer::request_id::incoming_request_id,
    routes::analyze::analyze_request::AnalyzeRequest,
};

/// `POST /api/v1/analyze-files`: every supported file, grouped by detected language.
#[instrument(name = "analyze_files_route", skip_all)]
pub async fn analyze_files_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let request_id = incoming_request_id(&headers).unwrap_or("-");
    debug!(request_id = %request_id, directory = %body.directory, "analyze_files_route: start");

    match list_files(&state, body).await {
        Ok(listing) => {
            debug!(
                request_id = %request_id,
                languages = listing.files_by_language.len(),
                "analyze_files_route: success"
            );
            ApiResponse::ok(listing)
        }
        Err(err) => {
            debug!(request_id = %request_id, error = %err, "analyze_files_route: failed");
            err.into_response()
        }
    }
}

async fn list_files(state: &AppState, body: AnalyzeRequest) -> AppResult<FilesByLanguage> {
    let directory = body.into_directory()?;
    let config = Arc::clone(&state.analyzer_config);

    // One walk for all languages instead of one per detected language.
    let listing = task::spawn_blocking(move || {
        LanguageAnalyzer::with_config(&directory, config)?.files_by_detected_language()
    })
    .await??;

    Ok(listing)
}
