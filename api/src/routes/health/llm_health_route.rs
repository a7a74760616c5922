use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
};

/// `GET /health/llm`: one round-trip to the configured model.
pub async fn llm_health_route(State(state): State<Arc<AppState>>) -> Response {
    let Some(recommender) = state.recommender.as_ref() else {
        return AppError::LlmNotConfigured.into_response();
    };

    let report = recommender.test_connection().await;
    if report.ok {
        info!(model = %report.model, "llm_health_route: model reachable");
        ApiResponse::ok(report)
    } else {
        let reason = report.error.unwrap_or_default();
        warn!(model = %report.model, error = %reason, "llm_health_route: model unreachable");
        AppError::Http {
            status: StatusCode::BAD_GATEWAY,
            code: "LLM_UPSTREAM_ERROR",
            message: format!("model {} is unreachable: {reason}", report.model),
        }
        .into_response()
    }
}
