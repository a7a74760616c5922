use axum::response::Response;
use serde::Serialize;

use crate::core::{
    app_state::{SERVICE_NAME, SERVICE_VERSION},
    http::response_envelope::ApiResponse,
};

#[derive(Debug, Serialize)]
pub struct ServiceBanner {
    pub message: String,
    pub status: &'static str,
    pub version: &'static str,
    pub endpoints: [&'static str; 6],
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /`
pub async fn root_route() -> Response {
    let banner = ServiceBanner {
        message: format!("{SERVICE_NAME} API"),
        status: "active",
        version: SERVICE_VERSION,
        endpoints: [
            "/health",
            "/health/llm",
            "/api/v1/analyze",
            "/api/v1/analyze-files",
            "/api/v1/recommendation",
            "/api/v1/code-analysis",
        ],
    };
    ApiResponse::ok(banner)
}

/// `GET /health`: liveness only, touches neither the filesystem nor the LLM.
pub async fn health_route() -> Response {
    ApiResponse::ok(HealthStatus {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
