use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    middleware_layer::request_id::incoming_request_id,
    routes::security::{code_analysis_request::CodeAnalysisRequest, recommender},
};

/// `POST /api/v1/code-analysis`: free-form security review of a snippet.
#[instrument(name = "code_analysis_route", skip_all)]
pub async fn code_analysis_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CodeAnalysisRequest>,
) -> Response {
    let request_id = incoming_request_id(&headers).unwrap_or("-");
    debug!(
        request_id = %request_id,
        language = %body.language,
        code_len = body.code.len(),
        "code_analysis_route: start"
    );

    let result = async {
        let recommender = recommender(&state)?;
        body.validate()?;
        Ok::<_, AppError>(recommender.analyze_code(&body.code, &body.language).await?)
    }
    .await;

    match result {
        Ok(analysis) => {
            debug!(request_id = %request_id, "code_analysis_route: success");
            ApiResponse::ok(analysis)
        }
        Err(err) => {
            debug!(request_id = %request_id, error = %err, "code_analysis_route: failed");
            err.into_response()
        }
    }
}
