//! HTTP surface of the analysis backend.
//!
//! [`router`] builds the full axum application around a shared [`AppState`];
//! [`start`] binds it and serves until Ctrl+C.

pub mod core;
pub mod error_handler;
pub mod middleware_layer;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::{
    core::app_state::AppState,
    error_handler::AppError,
    middleware_layer::{
        cors::permissive_cors, json_extractor::json_error_mapper, request_id::request_id,
    },
    routes::{
        analyze::{analyze_files_route::analyze_files_route, analyze_route::analyze_route},
        health::{
            health_route::{health_route, root_route},
            llm_health_route::llm_health_route,
        },
        security::{
            code_analysis_route::code_analysis_route, recommendation_route::recommendation_route,
        },
    },
};

/// Builds the application router.
///
/// Directory analysis is served under `/api/v1` and, for older clients, at the
/// root as `/analyze` and `/analyze-files`.
pub fn router(state: Arc<AppState>) -> Router {
    let analysis = Router::new()
        .route("/analyze", post(analyze_route))
        .route("/analyze-files", post(analyze_files_route));

    let v1 = analysis
        .clone()
        .route("/recommendation", post(recommendation_route))
        .route("/code-analysis", post(code_analysis_route));

    Router::new()
        .route("/", get(root_route))
        .route("/health", get(health_route))
        .route("/health/llm", get(llm_health_route))
        .nest("/api/v1", v1)
        .merge(analysis)
        .fallback(not_found)
        .layer(middleware::from_fn(json_error_mapper))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(permissive_cors))
        .with_state(state)
}

async fn not_found() -> Response {
    AppError::NotFound.into_response()
}

/// Binds `state.config.bind_address` and serves until Ctrl+C.
pub async fn start(state: AppState) -> Result<(), AppError> {
    let address = state.config.bind_address.clone();
    let app = router(Arc::new(state));

    let listener = TcpListener::bind(&address).await.map_err(AppError::Bind)?;
    info!(address = %address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
