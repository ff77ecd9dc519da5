//! Mock dork generator for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ai::{AiError, DorkGenerator, GenerationContext};

/// A recorded generation call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedPrompt {
    pub prompt: String,
    pub context: GenerationContext,
}

/// Mock implementation of the DorkGenerator trait.
///
/// Returns a configurable dork, records every prompt and can be told to
/// fail the next call or to report itself unavailable.
#[derive(Debug, Clone)]
pub struct MockDorkGenerator {
    response: Arc<RwLock<String>>,
    prompts: Arc<RwLock<Vec<RecordedPrompt>>>,
    /// If set, the next generation will fail with this error.
    next_error: Arc<RwLock<Option<AiError>>>,
    available: Arc<RwLock<bool>>,
}

impl Default for MockDorkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDorkGenerator {
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new("site:example.com ext:sql".to_string())),
            prompts: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            available: Arc::new(RwLock::new(true)),
        }
    }

    pub async fn set_response(&self, dork: impl Into<String>) {
        *self.response.write().await = dork.into();
    }

    pub async fn set_next_error(&self, error: AiError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn set_available(&self, available: bool) {
        *self.available.write().await = available;
    }

    pub async fn recorded_prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.read().await.clone()
    }
}

#[async_trait]
impl DorkGenerator for MockDorkGenerator {
    fn name(&self) -> String {
        "mock (mock-model)".to_string()
    }

    async fn is_available(&self) -> bool {
        *self.available.read().await
    }

    async fn generate_dork(
        &self,
        prompt: &str,
        context: &GenerationContext,
    ) -> Result<String, AiError> {
        self.prompts.write().await.push(RecordedPrompt {
            prompt: prompt.to_string(),
            context: context.clone(),
        });

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        if !*self.available.read().await {
            return Err(AiError::NotConfigured);
        }

        Ok(self.response.read().await.clone())
    }
}
