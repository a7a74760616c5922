use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// Body of `POST /api/v1/analyze` and `POST /api/v1/analyze-files`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Server-side path of the directory to classify.
    pub directory: String,
}

impl AnalyzeRequest {
    /// The directory as sent, rejecting empty or whitespace-only values.
    pub fn into_directory(self) -> AppResult<String> {
        if self.directory.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "directory" });
        }
        Ok(self.directory)
    }
}
