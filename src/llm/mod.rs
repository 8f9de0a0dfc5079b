//! Text-generation service
//!
//! The plan sections are written by an external chat-completions API. The
//! rest of the crate talks to it through [`TextGenerator`] so tests can swap
//! in a stub.

pub mod groq;

use thiserror::Error;

pub use groq::GroqClient;

/// Default sampling temperature for plan requests
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion length limit
pub const DEFAULT_MAX_TOKENS: u32 = 1200;

/// One request to the text-generation service
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationRequest {
    pub fn new(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Text-generation failures
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API key not configured (set GROQ_API_KEY)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API returned no content")]
    EmptyResponse,
}

/// A blocking text-generation backend
///
/// Implementations make exactly one attempt per call.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Model identifier, for status reporting
    fn model(&self) -> &str;

    fn is_configured(&self) -> bool {
        true
    }
}
