//! Web search tool using the Tavily API
//!
//! This tool runs a web search and returns the results as plain text the
//! model can read as an observation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::tool::{Tool, ToolResult};
use crate::config::{TavilySettings, DEFAULT_TAVILY_MAX_RESULTS};

/// Default timeout in milliseconds (60 seconds)
const DEFAULT_TIMEOUT_MS: u64 = 60000;
/// Maximum content length per result in characters
const MAX_RESULT_CONTENT: usize = 2000;
/// Tavily API endpoint for searching
const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";

/// Web search tool backed by Tavily
pub struct TavilySearchTool {
    /// API key for Tavily
    api_key: String,
    /// Number of results to request
    max_results: u32,
    /// Search endpoint
    endpoint: String,
    /// HTTP client
    client: reqwest::Client,
}

/// Tavily search request
#[derive(Debug, Serialize)]
struct TavilySearchRequest<'a> {
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
    include_answer: bool,
}

/// Tavily search response
#[derive(Debug, Deserialize)]
struct TavilySearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilySearchResult>,
}

/// Individual search result from Tavily
#[derive(Debug, Deserialize)]
struct TavilySearchResult {
    #[serde(default)]
    title: Option<String>,
    url: String,
    #[serde(default)]
    content: Option<String>,
}

impl TavilySearchTool {
    /// Create a search tool from loaded settings
    pub fn from_settings(settings: &TavilySettings) -> Result<Self> {
        Self::with_api_key(settings.api_key.clone()).map(|t| t.with_max_results(settings.max_results))
    }

    /// Create a search tool with an explicit API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(DEFAULT_TIMEOUT_MS))
            .build()?;

        Ok(Self {
            api_key: api_key.into(),
            max_results: DEFAULT_TAVILY_MAX_RESULTS,
            endpoint: TAVILY_SEARCH_URL.to_string(),
            client,
        })
    }

    /// Set how many results each search returns
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    /// Override the search endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Run a search and return the parsed response
    async fn search(&self, query: &str) -> Result<TavilySearchResponse> {
        tracing::info!("[Tavily] Searching: {}", query);

        let request_body = TavilySearchRequest {
            query,
            max_results: self.max_results,
            search_depth: "basic",
            include_answer: true,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .context("Failed to send request to Tavily API")?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .context("Failed to read Tavily response body")?;

        tracing::debug!("[Tavily] Response status: {}", status);

        if !status.is_success() {
            tracing::error!("[Tavily] API error: {} - {}", status, response_text);
            anyhow::bail!("Tavily API error ({}): {}", status, response_text);
        }

        serde_json::from_str(&response_text).context("Failed to parse Tavily API response")
    }

    /// Render a search response as observation text
    fn format_results(response: &TavilySearchResponse) -> Option<String> {
        if response.results.is_empty() && response.answer.is_none() {
            return None;
        }

        let mut output = String::new();
        if let Some(answer) = response.answer.as_deref().filter(|a| !a.trim().is_empty()) {
            output.push_str(&format!("Answer: {}\n\n", answer.trim()));
        }

        for (i, result) in response.results.iter().enumerate() {
            let title = result.title.as_deref().unwrap_or("Untitled");
            output.push_str(&format!("{}. {}\n   URL: {}\n", i + 1, title, result.url));
            if let Some(content) = result.content.as_deref() {
                let content: String = content.chars().take(MAX_RESULT_CONTENT).collect();
                output.push_str(&format!("   {}\n", content.trim()));
            }
            output.push('\n');
        }

        Some(output.trim_end().to_string())
    }
}

#[async_trait]
impl Tool for TavilySearchTool {
    fn name(&self) -> &str {
        "tavily_search"
    }

    fn description(&self) -> &str {
        "A search engine optimized for comprehensive, accurate, and trusted results. \
         Useful for when you need to answer questions about current events. \
         Input should be a search query."
    }

    async fn execute(&self, input: &str) -> Result<ToolResult> {
        let query = input.trim();
        if query.is_empty() {
            return Ok(ToolResult::error("Search query must not be empty"));
        }

        let response = self.search(query).await?;
        match Self::format_results(&response) {
            Some(text) => Ok(ToolResult::success(text)),
            None => {
                tracing::warn!("[Tavily] No results for: {}", query);
                Ok(ToolResult::error("No results found."))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = TavilySearchRequest {
            query: "weather in Mar del Plata",
            max_results: 3,
            search_depth: "basic",
            include_answer: true,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["query"], "weather in Mar del Plata");
        assert_eq!(value["max_results"], 3);
        assert_eq!(value["include_answer"], true);
    }

    #[test]
    fn test_format_results() {
        let response: TavilySearchResponse = serde_json::from_value(json!({
            "query": "weather in Mar del Plata",
            "answer": "Sunny, 22°C.",
            "results": [
                {"title": "Forecast", "url": "https://weather.example/mdp", "content": "Clear skies all day.", "score": 0.9},
                {"url": "https://news.example/mdp", "content": "Beach season opens."}
            ],
            "response_time": 0.8
        }))
        .unwrap();

        let text = TavilySearchTool::format_results(&response).unwrap();
        assert!(text.starts_with("Answer: Sunny, 22°C."));
        assert!(text.contains("1. Forecast\n   URL: https://weather.example/mdp"));
        assert!(text.contains("Clear skies all day."));
        assert!(text.contains("2. Untitled"));
    }

    #[test]
    fn test_format_empty_results() {
        let response: TavilySearchResponse =
            serde_json::from_value(json!({"query": "x", "results": []})).unwrap();
        assert!(TavilySearchTool::format_results(&response).is_none());
    }

    #[tokio::test]
    async fn test_empty_query_is_soft_error() {
        let tool = TavilySearchTool::with_api_key("tvly-test").unwrap();
        let result = tool.execute("   ").await.unwrap();
        assert!(result.is_error);
    }

    #[test]
    fn test_from_settings() {
        let tool = TavilySearchTool::from_settings(&TavilySettings {
            api_key: "tvly-test".to_string(),
            max_results: 0,
        })
        .unwrap();
        assert_eq!(tool.max_results, 1);
        assert_eq!(tool.name(), "tavily_search");
    }
}
