//! LLM client abstraction and implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::AiError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Token usage statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt (instructions for the model)
    pub system: Option<String>,
    /// User message
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            max_tokens: 150,
            temperature: 0.3,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
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

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text
    pub text: String,
    /// Token usage
    pub usage: LlmUsage,
    /// Model used
    pub model: String,
}

/// Trait for LLM clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Provider name (e.g., "anthropic", "openai", "ollama")
    fn provider(&self) -> &str;

    /// Model name (e.g., "gpt-4o-mini")
    fn model(&self) -> &str;

    /// Whether the backend can currently serve requests.
    async fn is_available(&self) -> bool;

    /// Send a completion request and get a text response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError>;
}

fn send_error(e: reqwest::Error, timeout: Duration) -> AiError {
    if e.is_timeout() {
        AiError::Timeout(timeout)
    } else {
        AiError::Http(e.to_string())
    }
}

// ============================================================================
// Anthropic Implementation
// ============================================================================

/// Anthropic messages API client.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            api_base: "https://api.anthropic.com".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    model: String,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// `{"error": {"message": ...}}`, shared by Anthropic and OpenAI-style APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn provider(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let anthropic_request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            system: request.system,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt,
            }],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.api_base))
            .timeout(self.timeout)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(AiError::Api { status, message });
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AiError::Json(e.to_string()))?;

        let text = anthropic_response
            .content
            .into_iter()
            .filter(|c| c.content_type == "text")
            .map(|c| c.text)
            .collect::<Vec<_>>()
            .join("");

        Ok(CompletionResponse {
            text,
            usage: LlmUsage {
                input_tokens: anthropic_response.usage.input_tokens,
                output_tokens: anthropic_response.usage.output_tokens,
            },
            model: anthropic_response.model,
        })
    }
}

// ============================================================================
// OpenAI-compatible Implementation
// ============================================================================

/// Chat-completions client for OpenAI and the providers that mirror its API
/// (Groq, DeepSeek, xAI, Gemini, Hugging Face).
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    provider: String,
    api_key: Option<String>,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl OpenAiCompatClient {
    pub fn new(
        provider: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider: provider.into(),
            api_key,
            model: model.into(),
            api_base: api_base.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[async_trait]
impl LlmClient for OpenAiCompatClient {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::NotConfigured)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.prompt,
        });

        let chat_request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base.trim_end_matches('/')))
            .timeout(self.timeout)
            .bearer_auth(api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(AiError::Api { status, message });
        }

        let chat_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::Json(e.to_string()))?;

        let text = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        let usage = chat_response
            .usage
            .map(|u| LlmUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            text,
            usage,
            model: if chat_response.model.is_empty() {
                self.model.clone()
            } else {
                chat_response.model
            },
        })
    }
}

// ============================================================================
// Ollama Implementation
// ============================================================================

/// Ollama API client for local LLM inference.
///
/// Connects to a local Ollama server (default: http://localhost:11434).
/// No API key required.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            api_base: "http://localhost:11434".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set a custom API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    model: String,
    response: String,
    /// Number of tokens in the response
    #[serde(default)]
    eval_count: u32,
    /// Number of tokens in the prompt
    #[serde(default)]
    prompt_eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn provider(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/api/tags", self.api_base))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let ollama_request = OllamaRequest {
            model: self.model.clone(),
            prompt: request.prompt,
            system: request.system,
            stream: false,
            options: Some(OllamaOptions {
                temperature: Some(request.temperature),
                num_predict: Some(request.max_tokens),
            }),
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.api_base))
            .timeout(self.timeout)
            .header("content-type", "application/json")
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| send_error(e, self.timeout))?;

        let status = response.status().as_u16();

        if status != 200 {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaErrorResponse>(&error_text)
                .map(|e| e.error)
                .unwrap_or(error_text);
            return Err(AiError::Api { status, message });
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AiError::Json(e.to_string()))?;

        Ok(CompletionResponse {
            text: ollama_response.response,
            usage: LlmUsage {
                input_tokens: ollama_response.prompt_eval_count,
                output_tokens: ollama_response.eval_count,
            },
            model: ollama_response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new("Hello")
            .with_system("You are helpful")
            .with_max_tokens(100)
            .with_temperature(0.5);

        assert_eq!(request.prompt, "Hello");
        assert_eq!(request.system, Some("You are helpful".to_string()));
        assert_eq!(request.max_tokens, 100);
        assert_eq!(request.temperature, 0.5);
    }

    #[test]
    fn test_ollama_client_custom_base() {
        let client = OllamaClient::new("mistral").with_api_base("http://remote-server:11434/");
        assert_eq!(client.api_base, "http://remote-server:11434");
        assert_eq!(client.provider(), "ollama");
        assert_eq!(client.model(), "mistral");
    }

    #[tokio::test]
    async fn test_keyed_clients_unavailable_without_key() {
        let anthropic = AnthropicClient::new(None, "claude-3-haiku-20240307");
        assert!(!anthropic.is_available().await);
        let err = anthropic
            .complete(CompletionRequest::new("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::NotConfigured));

        let groq = OpenAiCompatClient::new("groq", None, "m", "https://api.groq.com/openai/v1");
        assert!(!groq.is_available().await);
        assert_eq!(groq.provider(), "groq");
    }

    #[test]
    fn test_chat_request_serialization() {
        let request = ChatCompletionRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: "Be terse".to_string(),
            }],
            max_tokens: 150,
            temperature: 0.3,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"gpt-4o-mini\""));
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"max_tokens\":150"));
    }

    #[test]
    fn test_chat_response_tolerates_missing_usage() {
        let json = r#"{"choices":[{"message":{"content":"site:a.com"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("site:a.com"));
    }

    #[test]
    fn test_ollama_request_serialization() {
        let request = OllamaRequest {
            model: "llama3.2".to_string(),
            prompt: "Hello".to_string(),
            system: Some("Be helpful".to_string()),
            stream: false,
            options: Some(OllamaOptions {
                temperature: Some(0.3),
                num_predict: Some(150),
            }),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"model\":\"llama3.2\""));
        assert!(json.contains("\"stream\":false"));
        assert!(json.contains("\"num_predict\":150"));
    }
}
