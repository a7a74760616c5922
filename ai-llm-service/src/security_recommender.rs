//! Security remediation prompts on top of [`GeminiService`].
//!
//! - Construct once, wrap in `Arc`, and share between request handlers.
//! - Every call is a single pass-through to the provider: no retry, no cache.
//!
//! # Example
//! ```no_run
//! use ai_llm_service::{
//!     config::default_config::config_gemini,
//!     security_recommender::{SecurityRecommender, Vulnerability},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let recommender = SecurityRecommender::new(config_gemini()?)?;
//!
//!     let vuln = Vulnerability {
//!         name: "Use of eval()".into(),
//!         language: "javascript".into(),
//!         severity: "critical".into(),
//!         description: "eval() executes arbitrary code".into(),
//!         code: "const result = eval(userInput);".into(),
//!         cwe: Some("CWE-95".into()),
//!     };
//!     let rec = recommender.recommend(&vuln).await?;
//!     println!("{}", rec.recommendation);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::AiLlmError,
    services::gemini_service::{GeminiService, Generation},
};

const CONNECTION_PROBE_PROMPT: &str =
    "What is an XSS security vulnerability? (answer in 1-2 lines)";

/// A vulnerability reported by the caller, to be explained and remediated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub name: String,
    pub language: String,
    pub severity: String,
    pub description: String,
    pub code: String,
    #[serde(default)]
    pub cwe: Option<String>,
}

/// Remediation text generated for one [`Vulnerability`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub vulnerability: String,
    pub recommendation: String,
    pub tokens_used: Option<u32>,
}

/// Free-form security review of a code fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeAnalysis {
    pub language: String,
    pub analysis: String,
    pub tokens_used: Option<u32>,
}

/// Outcome of a round-trip probe. Failures are folded in, never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionReport {
    pub model: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct SecurityRecommender {
    gemini: GeminiService,
}

impl SecurityRecommender {
    /// # Errors
    /// Whatever [`GeminiService::new`] rejects (provider, key, endpoint, client build).
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(Self {
            gemini: GeminiService::new(cfg)?,
        })
    }

    pub fn model(&self) -> &str {
        self.gemini.model()
    }

    /// Sends a tiny prompt and reports whether the model answered.
    #[instrument(skip_all, fields(model = %self.model()))]
    pub async fn test_connection(&self) -> ConnectionReport {
        match self.gemini.generate(CONNECTION_PROBE_PROMPT).await {
            Ok(Generation { text, .. }) => {
                info!("connection probe succeeded");
                ConnectionReport {
                    model: self.model().to_string(),
                    ok: true,
                    response: Some(text),
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "connection probe failed");
                ConnectionReport {
                    model: self.model().to_string(),
                    ok: false,
                    response: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    /// Explanation, three alternative fixes, a corrected example and references.
    ///
    /// # Errors
    /// Any [`AiLlmError`] from the provider call.
    #[instrument(skip_all, fields(model = %self.model(), vulnerability = %vuln.name))]
    pub async fn recommend(&self, vuln: &Vulnerability) -> Result<Recommendation, AiLlmError> {
        let generation = self.gemini.generate(&recommendation_prompt(vuln)).await?;
        Ok(Recommendation {
            vulnerability: vuln.name.clone(),
            recommendation: generation.text,
            tokens_used: generation.total_tokens,
        })
    }

    /// Vulnerabilities present, risk level and remediation for `code`.
    ///
    /// # Errors
    /// Any [`AiLlmError`] from the provider call.
    #[instrument(skip_all, fields(model = %self.model(), language = %language, code_len = code.len()))]
    pub async fn analyze_code(
        &self,
        code: &str,
        language: &str,
    ) -> Result<CodeAnalysis, AiLlmError> {
        let generation = self
            .gemini
            .generate(&code_analysis_prompt(code, language))
            .await?;
        Ok(CodeAnalysis {
            language: language.to_string(),
            analysis: generation.text,
            tokens_used: generation.total_tokens,
        })
    }
}

fn or_na(s: &str) -> &str {
    if s.trim().is_empty() { "N/A" } else { s }
}

fn recommendation_prompt(v: &Vulnerability) -> String {
    format!(
        r#"You are a software security expert. Analyze this vulnerability and provide a fix:

**Vulnerability**: {name}
**Language**: {language}
**Severity**: {severity}
**CWE**: {cwe}
**Description**: {description}

**Vulnerable code**:
```
{code}
```

Please provide:
1. **Problem explanation** (2-3 lines)
2. **3 different solutions** (each with a name and a short description)
3. **Corrected code example** (in the same language)
4. **Security references** (mention standards such as OWASP, SANS TOP 25, etc.)

Be concise but technically precise.
"#,
        name = or_na(&v.name),
        language = or_na(&v.language),
        severity = or_na(&v.severity),
        cwe = v.cwe.as_deref().map_or("N/A", or_na),
        description = or_na(&v.description),
        code = or_na(&v.code),
    )
}

fn code_analysis_prompt(code: &str, language: &str) -> String {
    format!(
        r#"Analyze this {language} code for security vulnerabilities:

```{language}
{code}
```

Identify:
1. Vulnerabilities present (if any)
2. Risk level (CRITICAL, HIGH, MEDIUM, LOW, NONE)
3. Remediation recommendations

Be specific and technical.
"#
    )
}
