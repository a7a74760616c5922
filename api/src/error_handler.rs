use ai_llm_service::{
    AiLlmError,
    error_handler::{ProviderError, ProviderErrorKind},
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use language_analyzer::AnalyzerError;
use thiserror::Error;
use tracing::error;

use crate::core::{
    app_state::ConfigError,
    http::response_envelope::{ApiErrorDetail, ApiResponse},
};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("field `{field}` must not be empty")]
    EmptyInput { field: &'static str },

    #[error("not found")]
    NotFound,

    // --- Domain ---
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("LLM provider is not configured (set GEMINI_API_KEY)")]
    LlmNotConfigured,

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Rich HTTP error with a specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 4xx
            AppError::EmptyInput { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Analyzer(AnalyzerError::InvalidDirectory { .. }) => StatusCode::NOT_FOUND,

            // upstream
            AppError::Llm(AiLlmError::Config(_)) | AppError::LlmNotConfigured => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,

            // custom mapped
            AppError::Http { status, .. } => *status,

            // 5xx
            AppError::Analyzer(_)
            | AppError::Join(_)
            | AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::EmptyInput { .. } => "EMPTY_INPUT",
            AppError::NotFound => "NOT_FOUND",
            AppError::Analyzer(AnalyzerError::InvalidDirectory { .. }) => "INVALID_DIRECTORY",
            AppError::Llm(AiLlmError::Config(_)) | AppError::LlmNotConfigured => {
                "LLM_NOT_CONFIGURED"
            }
            AppError::Llm(_) => "LLM_UPSTREAM_ERROR",
            AppError::Http { code, .. } => code,
            AppError::Analyzer(_)
            | AppError::Join(_)
            | AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_) => "INTERNAL_ERROR",
        }
    }

    fn details(&self) -> Vec<ApiErrorDetail> {
        match self {
            AppError::EmptyInput { field } => vec![field_hint(
                field,
                "Provide a non-blank string value.",
            )],
            AppError::Analyzer(AnalyzerError::InvalidDirectory { .. }) => {
                vec![field_hint(
                    "directory",
                    "Use an absolute path to an existing directory on the server.",
                )]
            }
            AppError::Llm(AiLlmError::Provider(ProviderError {
                kind: ProviderErrorKind::HttpStatus(http),
                ..
            })) => vec![ApiErrorDetail {
                path: None,
                hint: Some(format!("upstream answered {}", http.status)),
            }],
            _ => Vec::new(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "request failed");
        }
        ApiResponse::<()>::error(self.error_code(), self.to_string(), self.details())
            .into_response_with_status(status)
    }
}

fn field_hint(path: &str, hint: &str) -> ApiErrorDetail {
    ApiErrorDetail {
        path: Some(path.to_string()),
        hint: Some(hint.to_string()),
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::error_handler::{ConfigError as LlmConfigError, Provider};

    #[test]
    fn domain_errors_map_to_documented_statuses() {
        let invalid = AppError::from(AnalyzerError::InvalidDirectory {
            path: "/nope".into(),
            reason: "directory does not exist",
        });
        assert_eq!(invalid.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(invalid.error_code(), "INVALID_DIRECTORY");

        let empty = AppError::EmptyInput { field: "directory" };
        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(empty.error_code(), "EMPTY_INPUT");

        assert_eq!(
            AppError::LlmNotConfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        let missing_key = AppError::from(AiLlmError::from(LlmConfigError::MissingVar(
            "GEMINI_API_KEY",
        )));
        assert_eq!(missing_key.error_code(), "LLM_NOT_CONFIGURED");

        let upstream = AppError::from(AiLlmError::from(ProviderError::new(
            Provider::Gemini,
            ProviderErrorKind::EmptyCandidates,
        )));
        assert_eq!(upstream.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(upstream.error_code(), "LLM_UPSTREAM_ERROR");
    }

    #[test]
    fn server_side_errors_are_internal() {
        let err = AppError::Bind(std::io::Error::other("in use"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let denied = AppError::from(AnalyzerError::Io {
            path: "/srv/locked".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        });
        assert_eq!(denied.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(denied.error_code(), "INTERNAL_ERROR");
    }
}
