pub mod code_analysis_request;
pub mod code_analysis_route;
pub mod recommendation_request;
pub mod recommendation_route;

use std::sync::Arc;

use ai_llm_service::SecurityRecommender;

use crate::{core::app_state::AppState, error_handler::AppError};

fn recommender(state: &AppState) -> Result<Arc<SecurityRecommender>, AppError> {
    state
        .recommender
        .clone()
        .ok_or(AppError::LlmNotConfigured)
}
