//! TextGenerator trait — the abstraction over the language-model backend.
//!
//! The runtime treats text generation as an opaque capability: send a
//! prompt, get text back. Which model answers, over which protocol, is a
//! collaborator's concern. Callers — reasoning steps, mostly — are
//! expected to catch generator failures and substitute deterministic
//! fallback payloads rather than let them propagate.

use crate::error::GeneratorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A request to generate text from a prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The full prompt text
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: default_temperature(),
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Generated text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// The generated text
    pub text: String,
}

/// The core text-generation trait.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// A human-readable name for this generator backend.
    fn name(&self) -> &str;

    /// Generate text for the given prompt.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, GeneratorError>;
}

/// Ask the generator for JSON; `None` on failure or unparseable output so
/// the caller can substitute its deterministic fallback.
///
/// `operation` names the reasoning step or tool asking, for the log line.
pub async fn generate_json(
    generator: &dyn TextGenerator,
    operation: &str,
    prompt: String,
) -> Option<serde_json::Value> {
    match generator.generate(GenerationRequest::new(prompt)).await {
        Ok(response) => match serde_json::from_str(response.text.trim()) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(operation, error = %err, "generator output was not valid JSON, using fallback");
                None
            }
        },
        Err(err) => {
            warn!(operation, error = %err, "generation failed, using fallback");
            None
        }
    }
}
