//! OpenAI API client
//!
//! This module provides a direct HTTP client for the OpenAI Chat Completions API.
//! The agent only needs plain text completion with stop sequences, so every
//! prompt is sent as a single user message and the first choice's text is
//! returned.
//!
//! # Authentication
//!
//! Uses an OpenAI API key, taken from [`OpenAiSettings`] or passed directly.
//!
//! ```ignore
//! // From loaded settings
//! let llm = OpenAiProvider::from_settings(&settings.openai)?;
//!
//! // With explicit API key
//! let llm = OpenAiProvider::new("sk-...")?.with_model("gpt-4o-mini");
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::provider::LlmProvider;
use crate::config::{OpenAiSettings, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_TEMPERATURE};

/// OpenAI accepts at most this many stop sequences per request
const MAX_STOP_SEQUENCES: usize = 4;

// ============================================================================
// OpenAI-specific request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    choices: Vec<OpenAiChoice>,
    #[serde(default)]
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// ============================================================================
// OpenAiProvider
// ============================================================================

/// OpenAI LLM provider
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: f32,
    api_base: String,
}

impl OpenAiProvider {
    /// Create a provider from loaded settings
    pub fn from_settings(settings: &OpenAiSettings) -> Result<Self> {
        tracing::info!("Creating OpenAI provider");
        tracing::info!("Using model: {}", settings.model);
        if settings.base_url != DEFAULT_OPENAI_BASE_URL {
            tracing::info!("Using custom base URL: {}", settings.base_url);
        }

        Ok(Self {
            client: Client::new(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
            api_base: settings.base_url.clone(),
        })
    }

    /// Create a new OpenAI provider with a specific API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            anyhow::bail!("OpenAI API key must not be empty");
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: None,
            temperature: DEFAULT_TEMPERATURE,
            api_base: DEFAULT_OPENAI_BASE_URL.to_string(),
        })
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the max tokens for responses
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Point the client at a different API base (proxies, compatible servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Reasoning models (o-series, gpt-5.x) use max_completion_tokens and reject temperature
    fn is_reasoning_model(&self) -> bool {
        self.model.starts_with("o1")
            || self.model.starts_with("o3")
            || self.model.starts_with("o4")
            || self.model.starts_with("gpt-5")
    }

    /// Build a chat completion request for a single prompt
    fn build_request(&self, prompt: &str, stop: &[String]) -> OpenAiRequest {
        let reasoning = self.is_reasoning_model();

        let (max_tokens, max_completion_tokens) = if reasoning {
            (None, self.max_tokens)
        } else {
            (self.max_tokens, None)
        };

        let stop = if stop.is_empty() {
            None
        } else {
            if stop.len() > MAX_STOP_SEQUENCES {
                tracing::warn!(
                    "[OpenAI] {} stop sequences given, only the first {} are sent",
                    stop.len(),
                    MAX_STOP_SEQUENCES
                );
            }
            Some(stop.iter().take(MAX_STOP_SEQUENCES).cloned().collect())
        };

        OpenAiRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens,
            max_completion_tokens,
            temperature: if reasoning { None } else { Some(self.temperature) },
            stop,
        }
    }

    /// Extract the generated text from a response
    fn extract_text(response: OpenAiResponse) -> Result<String> {
        if let Some(usage) = &response.usage {
            tracing::debug!(
                "[OpenAI] Usage: {} prompt tokens, {} completion tokens",
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .with_context(|| format!("OpenAI response {} contained no choices", response.id))?;

        tracing::debug!("[OpenAI] Finish reason: {:?}", choice.finish_reason);

        Ok(choice.message.content.unwrap_or_default())
    }

    /// Send a non-streaming request to the OpenAI API
    async fn send_openai_request(&self, request: &OpenAiRequest) -> Result<OpenAiResponse> {
        let url = format!("{}/chat/completions", self.api_base);

        let request_json =
            serde_json::to_string(request).context("Failed to serialize OpenAI request")?;
        tracing::debug!("[OpenAI] Request JSON: {}", request_json);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .body(request_json)
            .send()
            .await
            .context("Failed to send request to OpenAI API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read OpenAI response body")?;

        tracing::debug!("[OpenAI] Response status: {}", status);
        tracing::debug!("[OpenAI] Response body: {}", response_text);

        if !status.is_success() {
            tracing::error!("[OpenAI] API error: {} - {}", status, response_text);
            anyhow::bail!("OpenAI API error ({}): {}", status, response_text);
        }

        let openai_response: OpenAiResponse = serde_json::from_str(&response_text)
            .context("Failed to parse OpenAI API response")?;

        Ok(openai_response)
    }
}

// ============================================================================
// LlmProvider implementation
// ============================================================================

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String> {
        tracing::info!("[OpenAI] Sending completion request");
        tracing::debug!("[OpenAI] Prompt length: {} chars, stop: {:?}", prompt.len(), stop);

        let request = self.build_request(prompt, stop);
        let response = self.send_openai_request(&request).await?;
        Self::extract_text(response)
    }

    fn model(&self) -> String {
        self.model.clone()
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
