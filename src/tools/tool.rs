//! Tool trait definition
//!
//! All tools implement this trait to provide a consistent interface.
//! A tool is a unary text-to-text function: the agent hands it the
//! `Action Input` text and records whatever it returns as the observation.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of executing a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Text recorded as the observation
    pub output: String,
    /// Whether the tool reported a soft failure (still shown to the model)
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful tool result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            is_error: false,
        }
    }

    /// Create an error tool result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            output: message.into(),
            is_error: true,
        }
    }
}

/// Trait for tools that the agent can use
///
/// Returning `Err` aborts the agent run; return [`ToolResult::error`] for
/// failures the model should see and react to.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the name of this tool, as the model must write it after `Action:`
    fn name(&self) -> &str;

    /// Get a description of this tool, rendered into the prompt
    fn description(&self) -> &str;

    /// Execute the tool with the given input text
    async fn execute(&self, input: &str) -> Result<ToolResult>;
}
