use std::sync::Arc;

use ai_llm_service::{
    AiLlmError, SecurityRecommender, config::default_config::config_gemini,
    error_handler::ConfigError as LlmConfigError,
};
use language_analyzer::AnalyzerConfig;
use thiserror::Error;
use tracing::{info, warn};

use crate::error_handler::AppError;

pub const SERVICE_NAME: &str = "ARTHEON-SAST Backend";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value {0:?}: expected 1..=65535")]
    InvalidPort(String),
}

/// Process-level settings read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `host:port` the listener binds to.
    pub bind_address: String,
    /// Verbose logging.
    pub debug: bool,
}

impl AppConfig {
    /// Reads `API_ADDRESS`, or `HOST` + `PORT`, and `DEBUG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|name: &str| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_address = match non_blank("API_ADDRESS") {
            Some(addr) => addr.trim().to_string(),
            None => {
                let host = non_blank("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = match non_blank("PORT") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u16>()
                        .ok()
                        .filter(|p| *p != 0)
                        .ok_or(ConfigError::InvalidPort(raw))?,
                    None => DEFAULT_PORT,
                };
                format!("{}:{port}", host.trim())
            }
        };

        let debug = non_blank("DEBUG").is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        Ok(Self {
            bind_address,
            debug,
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    pub config: AppConfig,
    /// Extension table + ignore set shared by every analyzer the handlers build.
    pub analyzer_config: Arc<AnalyzerConfig>,
    /// `None` when `GEMINI_API_KEY` is not configured; LLM routes answer 503.
    pub recommender: Option<Arc<SecurityRecommender>>,
}

impl AppState {
    /// Builds the state from `config` and the Gemini environment.
    ///
    /// A missing `GEMINI_API_KEY` only disables the LLM routes; any other LLM
    /// misconfiguration aborts start-up.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let recommender = match config_gemini() {
            Ok(cfg) => {
                info!(model = %cfg.model, "security recommender enabled");
                Some(Arc::new(SecurityRecommender::new(cfg)?))
            }
            Err(AiLlmError::Config(LlmConfigError::MissingVar("GEMINI_API_KEY"))) => {
                warn!("GEMINI_API_KEY is not set; recommendation routes are disabled");
                None
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Self::with_parts(
            config,
            Arc::new(AnalyzerConfig::default()),
            recommender,
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        analyzer_config: Arc<AnalyzerConfig>,
        recommender: Option<Arc<SecurityRecommender>>,
    ) -> Self {
        Self {
            config,
            analyzer_config,
            recommender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&'static str, &'static str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(&|name: &str| map.get(name).map(|v| v.to_string()))
    }

    #[test]
    fn defaults() {
        let c = cfg(&[]).unwrap();
        assert_eq!(c.bind_address, "0.0.0.0:8000");
        assert!(!c.debug);
    }

    #[test]
    fn host_port_and_debug() {
        let c = cfg(&[("HOST", "127.0.0.1"), ("PORT", "9090"), ("DEBUG", "True")]).unwrap();
        assert_eq!(c.bind_address, "127.0.0.1:9090");
        assert!(c.debug);
    }

    #[test]
    fn api_address_wins() {
        let c = cfg(&[("API_ADDRESS", "localhost:3000"), ("PORT", "1")]).unwrap();
        assert_eq!(c.bind_address, "localhost:3000");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert_eq!(
            cfg(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort("eighty".into()))
        );
        assert!(cfg(&[("PORT", "0")]).is_err());
    }
}
