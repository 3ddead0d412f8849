//! Process configuration
//!
//! Settings are read from the environment once at startup and handed to the
//! constructors that need them. Nothing here is global.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
/// Default chat model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default embeddings model
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default number of Tavily results per query
pub const DEFAULT_TAVILY_MAX_RESULTS: u32 = 5;
/// Default cap on agent iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 15;
/// Default directory for log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// OpenAI connection settings
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub max_tokens: Option<u32>,
    pub temperature: f32,
    pub embedding_model: String,
}

impl OpenAiSettings {
    /// Settings with defaults for everything except the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            max_tokens: None,
            temperature: DEFAULT_TEMPERATURE,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

/// Tavily search settings
#[derive(Debug, Clone)]
pub struct TavilySettings {
    pub api_key: String,
    pub max_results: u32,
}

/// Everything the binary needs to wire up an agent
#[derive(Debug, Clone)]
pub struct Settings {
    pub openai: OpenAiSettings,
    /// Absent when `TAVILY_API_KEY` is not set
    pub tavily: Option<TavilySettings>,
    /// `None` means the loop runs until the model finishes
    pub max_iterations: Option<usize>,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Load settings from process environment variables
    ///
    /// Reads:
    /// - `OPENAI_API_KEY` (required)
    /// - `OPENAI_MODEL`, `OPENAI_BASE_URL`, `OPENAI_MAX_TOKENS`,
    ///   `OPENAI_TEMPERATURE`, `OPENAI_EMBEDDING_MODEL` (optional)
    /// - `TAVILY_API_KEY`, `TAVILY_MAX_RESULTS` (optional)
    /// - `AGENT_MAX_ITERATIONS` (optional, `0` disables the cap)
    /// - `AGENT_LOG_DIR` (optional, defaults to `logs`)
    pub fn from_env() -> Result<Self> {
        tracing::info!("Loading settings from environment");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;

        let mut openai = OpenAiSettings::new(api_key);
        if let Some(model) = get("OPENAI_MODEL") {
            openai.model = model;
        }
        if let Some(base_url) = get("OPENAI_BASE_URL") {
            openai.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("OPENAI_MAX_TOKENS") {
            openai.max_tokens = Some(raw.parse().context("OPENAI_MAX_TOKENS must be an integer")?);
        }
        if let Some(raw) = get("OPENAI_TEMPERATURE") {
            openai.temperature = raw.parse().context("OPENAI_TEMPERATURE must be a number")?;
        }
        if let Some(model) = get("OPENAI_EMBEDDING_MODEL") {
            openai.embedding_model = model;
        }

        let tavily = match get("TAVILY_API_KEY") {
            Some(api_key) => {
                let max_results = match get("TAVILY_MAX_RESULTS") {
                    Some(raw) => raw.parse().context("TAVILY_MAX_RESULTS must be an integer")?,
                    None => DEFAULT_TAVILY_MAX_RESULTS,
                };
                Some(TavilySettings { api_key, max_results })
            }
            None => None,
        };

        let max_iterations = match get("AGENT_MAX_ITERATIONS") {
            Some(raw) => {
                let n: usize = raw.parse().context("AGENT_MAX_ITERATIONS must be an integer")?;
                (n > 0).then_some(n)
            }
            None => Some(DEFAULT_MAX_ITERATIONS),
        };

        let log_dir = log_dir_from_lookup(&lookup);

        tracing::info!("Using model: {}", openai.model);
        if tavily.is_none() {
            tracing::warn!("TAVILY_API_KEY not set, web search disabled");
        }

        Ok(Self {
            openai,
            tavily,
            max_iterations,
            log_dir,
        })
    }
}

/// Resolve the log directory from `AGENT_LOG_DIR`
///
/// Read on its own so logging can be set up before [`Settings::from_env`]
/// runs and logs what it loaded.
pub fn log_dir_from_env() -> PathBuf {
    log_dir_from_lookup(|key| env::var(key).ok())
}

/// Resolve the log directory through an arbitrary key lookup
pub fn log_dir_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("AGENT_LOG_DIR")
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}
