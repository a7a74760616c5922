use ai_llm_service::Vulnerability;
use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// Body of `POST /api/v1/recommendation`.
#[derive(Debug, Deserialize)]
pub struct VulnerabilityRequest {
    pub name: String,
    pub language: String,
    pub severity: String,
    pub description: String,
    pub code: String,
    #[serde(default)]
    pub cwe: Option<String>,
}

impl VulnerabilityRequest {
    pub fn into_vulnerability(self) -> AppResult<Vulnerability> {
        if self.name.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "name" });
        }
        if self.code.trim().is_empty() {
            return Err(AppError::EmptyInput { field: "code" });
        }
        Ok(Vulnerability {
            name: self.name,
            language: self.language,
            severity: self.severity,
            description: self.description,
            code: self.code,
            cwe: self.cwe.filter(|c| !c.trim().is_empty()),
        })
    }
}
