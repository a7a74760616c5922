/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// Only Google Gemini is wired today. Adding another backend means a new variant
/// here plus a matching service under `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Generative Language API (`generateContent`).
    Gemini,
}
