//! Mock generators shared across the tool tests.

use async_trait::async_trait;
use mentora_core::error::GeneratorError;
use mentora_core::generator::{GenerationRequest, GenerationResponse, TextGenerator};

/// Fails every call.
pub struct DeadGenerator;

#[async_trait]
impl TextGenerator for DeadGenerator {
    fn name(&self) -> &str {
        "dead"
    }
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, GeneratorError> {
        Err(GeneratorError::RequestFailed("mock outage".into()))
    }
}

/// Returns the same text on every call.
pub struct StaticGenerator {
    text: String,
}

impl StaticGenerator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    fn name(&self) -> &str {
        "static"
    }
    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, GeneratorError> {
        Ok(GenerationResponse {
            text: self.text.clone(),
        })
    }
}
