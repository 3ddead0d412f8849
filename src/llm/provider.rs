//! Text-generation provider trait

use anyhow::Result;
use async_trait::async_trait;

/// A text-generation service the agent can prompt
///
/// Implementations take a fully rendered prompt and a list of stop
/// sequences, and return the raw generated text. Generation must halt
/// before any stop sequence would be emitted; the stop sequence itself is
/// not part of the returned text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str, stop: &[String]) -> Result<String>;

    /// Model identifier used for requests
    fn model(&self) -> String;

    /// Short provider name for logs
    fn provider_name(&self) -> &str;
}
