//! Text embeddings
//!
//! [`OpenAiEmbeddings`] calls the OpenAI embeddings endpoint. Tests and demos
//! can plug in any other [`Embedder`].

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{OpenAiSettings, DEFAULT_EMBEDDING_MODEL, DEFAULT_OPENAI_BASE_URL};

/// Turns texts into vectors
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed each text; the output has one vector per input, in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

/// OpenAI embeddings client
pub struct OpenAiEmbeddings {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl OpenAiEmbeddings {
    pub fn from_settings(settings: &OpenAiSettings) -> Self {
        tracing::info!("Creating OpenAI embeddings client ({})", settings.embedding_model);
        Self {
            client: Client::new(),
            api_key: settings.api_key.clone(),
            model: settings.embedding_model.clone(),
            api_base: settings.base_url.clone(),
        }
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            api_base: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Put vectors back in input order; the API does not promise ordering
    fn into_ordered(response: EmbeddingResponse, expected: usize) -> Result<Vec<Vec<f32>>> {
        if response.data.len() != expected {
            anyhow::bail!(
                "OpenAI returned {} embeddings for {} inputs",
                response.data.len(),
                expected
            );
        }

        let mut data = response.data;
        data.sort_by_key(|d| d.index);
        Ok(data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAiEmbeddings {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!("[OpenAI] Embedding {} texts", texts.len());
        let url = format!("{}/embeddings", self.api_base);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await
            .context("Failed to send request to OpenAI embeddings API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read OpenAI embeddings response body")?;

        if !status.is_success() {
            tracing::error!("[OpenAI] Embeddings API error: {} - {}", status, body);
            anyhow::bail!("OpenAI embeddings API error ({}): {}", status, body);
        }

        let parsed: EmbeddingResponse =
            serde_json::from_str(&body).context("Failed to parse OpenAI embeddings response")?;
        Self::into_ordered(parsed, texts.len())
    }
}
