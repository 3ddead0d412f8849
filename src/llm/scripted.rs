//! Scripted provider that replays canned completions
//!
//! Useful for running the agent loop offline: each call to `generate()`
//! returns the next scripted response, cut before the first stop sequence
//! the way a real model halts, and records the prompt and stop sequences it
//! was given, so tests can inspect exactly what the agent sent.
//!
//! ```ignore
//! let llm = ScriptedProvider::new([
//!     "I should measure it.\nAction: get_text_length\nAction Input: \"DOG\"",
//!     "I now know the final answer\nFinal Answer: 3",
//! ]);
//! ```

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::provider::LlmProvider;

/// A recorded `generate()` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub stop: Vec<String>,
}

/// Provider that answers from a fixed script
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    /// Create a provider that replays `responses` in order
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call made so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of `generate()` calls made so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Number of scripted responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String> {
        self.calls
            .lock()
            .map_err(|_| anyhow!("scripted provider call log poisoned"))?
            .push(RecordedCall {
                prompt: prompt.to_string(),
                stop: stop.to_vec(),
            });

        let next = self
            .responses
            .lock()
            .map_err(|_| anyhow!("scripted provider script poisoned"))?
            .pop_front();

        match next {
            Some(response) => {
                let response = truncate_at_stop(response, stop);
                tracing::debug!("[Scripted] Returning: {}", response);
                Ok(response)
            }
            None => Err(anyhow!("Scripted provider has no responses left")),
        }
    }

    fn model(&self) -> String {
        "scripted".to_string()
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }
}

/// Cut `text` before the earliest occurrence of any stop sequence
fn truncate_at_stop(mut text: String, stop: &[String]) -> String {
    let cut = stop
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min();
    if let Some(idx) = cut {
        text.truncate(idx);
    }
    text
}
