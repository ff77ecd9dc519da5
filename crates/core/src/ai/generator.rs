use async_trait::async_trait;
use tracing::{debug, info};

use super::detector::auto_fix_common_issues;
use super::llm::{CompletionRequest, LlmClient};
use super::prompt::{build_user_prompt, GenerationContext, SYSTEM_PROMPT};
use super::AiError;

/// Turns a natural-language request into a dork query.
#[async_trait]
pub trait DorkGenerator: Send + Sync {
    /// Display name, e.g. `openai (gpt-4o-mini)`.
    fn name(&self) -> String;

    async fn is_available(&self) -> bool;

    /// Generate a cleaned-up dork. The result is not validated.
    async fn generate_dork(
        &self,
        prompt: &str,
        context: &GenerationContext,
    ) -> Result<String, AiError>;
}

/// [`DorkGenerator`] backed by any [`LlmClient`].
pub struct LlmDorkGenerator {
    client: Box<dyn LlmClient>,
    max_tokens: u32,
    temperature: f32,
}

impl LlmDorkGenerator {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self {
            client,
            max_tokens: 150,
            temperature: 0.3,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[async_trait]
impl DorkGenerator for LlmDorkGenerator {
    fn name(&self) -> String {
        format!("{} ({})", self.client.provider(), self.client.model())
    }

    async fn is_available(&self) -> bool {
        self.client.is_available().await
    }

    async fn generate_dork(
        &self,
        prompt: &str,
        context: &GenerationContext,
    ) -> Result<String, AiError> {
        let request = CompletionRequest::new(build_user_prompt(prompt, context))
            .with_system(SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        let response = self.client.complete(request).await?;
        debug!(
            "{} used {} input / {} output tokens",
            self.name(),
            response.usage.input_tokens,
            response.usage.output_tokens
        );

        // Models sometimes explain themselves after the dork.
        let unfenced = response.text.replace("```", "");
        let first_line = unfenced
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        let dork = auto_fix_common_issues(first_line);
        if dork.is_empty() {
            return Err(AiError::EmptyResponse);
        }

        info!("Generated dork via {}: {}", self.name(), dork);
        Ok(dork)
    }
}
