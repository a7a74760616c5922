use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// Body of `POST /api/v1/code-analysis`.
#[derive(Debug, Deserialize)]
pub struct CodeAnalysisRequest {
    pub code: String,
    pub language: String,
}

impl CodeAnalysisRequest {
    pub fn validate(&self) -> AppResult<()> {
        if self.code.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "code" });
        }
        if self.language.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "language" });
        }
        Ok(())
    }
}
