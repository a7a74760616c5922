//! Default LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GEMINI_API_KEY` = API key (mandatory)
//! - `GEMINI_MODEL`   = model name (default `gemini-2.0-flash`)
//! - `GEMINI_URL`     = API base (default `https://generativelanguage.googleapis.com`)
//! - `LLM_MAX_TOKENS` = optional max output tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, must_var, opt_u32_var, opt_var, validate_http_endpoint},
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Constructs the Gemini config from the process environment.
///
/// # Defaults
/// - `temperature = Some(0.2)`
/// - `timeout_secs = Some(60)`
///
/// # Errors
/// - [`crate::error_handler::ConfigError::MissingVar`] if `GEMINI_API_KEY` is unset
/// - [`crate::error_handler::ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` is not a u32
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if `GEMINI_URL` lacks http(s)
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    config_gemini_from(&|name: &str| std::env::var(name).ok())
}

/// Same as [`config_gemini`], reading variables through `lookup`.
///
/// # Errors
/// See [`config_gemini`].
pub fn config_gemini_from<F>(lookup: &F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_var(lookup, "GEMINI_API_KEY")?;
    let model =
        opt_var(lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
    let endpoint = opt_var(lookup, "GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string());
    validate_http_endpoint("GEMINI_URL", &endpoint)?;
    let max_tokens = opt_u32_var(lookup, "LLM_MAX_TOKENS")?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(60),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handler::ConfigError;
    use std::collections::HashMap;

    fn lookup(map: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |name: &str| map.get(name).map(|v| v.to_string())
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = config_gemini_from(&lookup(HashMap::from([("GEMINI_API_KEY", "k")]))).unwrap();
        assert_eq!(cfg.provider, LlmProvider::Gemini);
        assert_eq!(cfg.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_GEMINI_URL);
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.max_tokens, None);
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config_gemini_from(&lookup(HashMap::from([
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("GEMINI_URL", "http://127.0.0.1:9999"),
            ("LLM_MAX_TOKENS", "1024"),
        ])))
        .unwrap();
        assert_eq!(cfg.model, "gemini-pro");
        assert_eq!(cfg.endpoint, "http://127.0.0.1:9999");
        assert_eq!(cfg.max_tokens, Some(1024));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = config_gemini_from(&lookup(HashMap::new())).unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::MissingVar("GEMINI_API_KEY"))
        ));
    }

    #[test]
    fn bad_url_is_an_error() {
        let err = config_gemini_from(&lookup(HashMap::from([
            ("GEMINI_API_KEY", "k"),
            ("GEMINI_URL", "ftp://nope"),
        ])))
        .unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "GEMINI_URL", .. })
        ));
    }
}
