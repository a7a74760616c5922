//! Gemini-backed security remediation service.
//!
//! - [`config`]: model config and the env-driven default
//! - [`services::gemini_service`]: single-request `generateContent` client
//! - [`security_recommender`]: vulnerability / code-review prompts on top of it
//! - [`error_handler`]: unified [`AiLlmError`]

pub mod config;
pub mod error_handler;
pub mod security_recommender;
pub mod services;

pub use error_handler::{AiLlmError, Result};
pub use security_recommender::{
    CodeAnalysis, ConnectionReport, Recommendation, SecurityRecommender, Vulnerability,
};
