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
    routes::security::{recommender, recommendation_request::VulnerabilityRequest},
};

/// `POST /api/v1/recommendation`: remediation advice for one reported vulnerability.
#[instrument(name = "recommendation_route", skip_all)]
pub async fn recommendation_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<VulnerabilityRequest>,
) -> Response {
    let request_id = incoming_request_id(&headers).unwrap_or("-");
    debug!(request_id = %request_id, vulnerability = %body.name, "recommendation_route: start");

    let result = async {
        let recommender = recommender(&state)?;
        let vulnerability = body.into_vulnerability()?;
        Ok::<_, AppError>(recommender.recommend(&vulnerability).await?)
    }
    .await;

    match result {
        Ok(recommendation) => {
            debug!(
                request_id = %request_id,
                tokens_used = ?recommendation.tokens_used,
                "recommendation_route: success"
            );
            ApiResponse::ok(recommendation)
        }
        Err(err) => {
            debug!(request_id = %request_id, error = %err, "recommendation_route: failed");
            err.into_response()
        }
    }
}
