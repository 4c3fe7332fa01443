//! Generator decorator that applies configured sampling settings.

use async_trait::async_trait;
use mentora_config::GenerationConfig;
use mentora_core::error::GeneratorError;
use mentora_core::generator::{GenerationRequest, GenerationResponse, TextGenerator};
use std::sync::Arc;

/// Wraps a generator backend and stamps every request with the
/// temperature and token limit from [`GenerationConfig`], so individual
/// reasoning steps and tools never need to know the settings exist.
pub struct ConfiguredGenerator {
    inner: Arc<dyn TextGenerator>,
    config: GenerationConfig,
}

impl ConfiguredGenerator {
    pub fn new(inner: Arc<dyn TextGenerator>, config: GenerationConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl TextGenerator for ConfiguredGenerator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(
        &self,
        mut request: GenerationRequest,
    ) -> std::result::Result<GenerationResponse, GeneratorError> {
        request.temperature = self.config.temperature;
        request.max_tokens = Some(self.config.max_tokens);
        self.inner.generate(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentora_config::AppConfig;
    use std::sync::Mutex;

    /// Records the request it receives so tests can inspect what the
    /// decorator forwarded.
    struct RecordingGenerator {
        last: Mutex<Option<GenerationRequest>>,
    }

    impl RecordingGenerator {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                last: Mutex::new(None),
            })
        }

        fn last_request(&self) -> GenerationRequest {
            self.last.lock().unwrap().clone().unwrap()
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        fn name(&self) -> &str {
            "recording"
        }

        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> std::result::Result<GenerationResponse, GeneratorError> {
            *self.last.lock().unwrap() = Some(request);
            Ok(GenerationResponse {
                text: "{}".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn stamps_configured_temperature_and_token_limit() {
        let backend = RecordingGenerator::new();
        let config = GenerationConfig {
            temperature: 0.2,
            max_tokens: 256,
        };
        let generator = ConfiguredGenerator::new(backend.clone(), config);

        generator
            .generate(GenerationRequest::new("plan my semester"))
            .await
            .unwrap();

        let sent = backend.last_request();
        assert!((sent.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(sent.max_tokens, Some(256));
        assert_eq!(sent.prompt, "plan my semester");
    }

    #[tokio::test]
    async fn loaded_config_settings_reach_the_backend() {
        let backend = RecordingGenerator::new();
        let config = AppConfig::default();
        let generator = ConfiguredGenerator::new(backend.clone(), config.generation);

        generator
            .generate(GenerationRequest::new("p").with_temperature(1.9))
            .await
            .unwrap();

        // The configured settings win over per-request ones.
        let sent = backend.last_request();
        assert!((sent.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(sent.max_tokens, Some(1024));
    }
}
