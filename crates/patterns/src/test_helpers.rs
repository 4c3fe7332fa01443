//! Shared test helpers for procedure tests.

use async_trait::async_trait;
use mentora_core::error::GeneratorError;
use mentora_core::generator::{GenerationRequest, GenerationResponse, TextGenerator};
use std::sync::Mutex;

/// A mock generator that returns a sequence of scripted responses.
///
/// Each call to `generate` returns the next response in the queue.
/// Panics if more calls are made than responses provided.
pub struct SequentialMockGenerator {
    responses: Mutex<Vec<String>>,
    call_count: Mutex<usize>,
}

impl SequentialMockGenerator {
    pub fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(String::from).collect()),
            call_count: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl TextGenerator for SequentialMockGenerator {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if *count >= responses.len() {
            panic!(
                "SequentialMockGenerator: no more responses (call #{}, have {})",
                *count,
                responses.len()
            );
        }

        let text = responses[*count].clone();
        *count += 1;
        Ok(GenerationResponse { text })
    }
}

/// A generator that always returns the same text.
pub struct StaticGenerator {
    text: String,
}

impl StaticGenerator {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    fn name(&self) -> &str {
        "static_mock"
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        Ok(GenerationResponse {
            text: self.text.clone(),
        })
    }
}

/// A generator that fails every call.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    fn name(&self) -> &str {
        "failing_mock"
    }

    async fn generate(
        &self,
        _request: GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        Err(GeneratorError::RequestFailed("mock outage".into()))
    }
}
