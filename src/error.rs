//! Error types for the agent loop
//!
//! HTTP clients and tools report failures as `anyhow::Error`; the agent wraps
//! them into [`AgentError`] at the loop boundary so callers can tell a bad
//! model response apart from an unknown tool or a failed request.

use thiserror::Error;

/// The model output matched neither the action nor the final-answer grammar
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}: `{output}`")]
pub struct OutputParseError {
    /// What was wrong with the output
    pub message: String,
    /// The raw text that failed to parse
    pub output: String,
}

impl OutputParseError {
    pub fn new(message: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            output: output.into(),
        }
    }
}

/// Errors that stop an agent run
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model produced text the grammar parser could not classify
    #[error("Could not parse model output: {0}")]
    Parse(#[from] OutputParseError),

    /// The model asked for a tool that is not in the registry
    #[error("Tool not found: '{name}' (available: {})", .available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },

    /// The text-generation service failed
    #[error("LLM request failed: {0}")]
    Llm(#[source] anyhow::Error),

    /// A tool failed hard while executing
    #[error("Tool '{name}' failed: {source}")]
    Tool {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// The agent configuration was rejected
    #[error("Invalid agent configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_message_names_tool() {
        let err = AgentError::UnknownTool {
            name: "teleport".to_string(),
            available: vec!["search".to_string(), "calculator".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("'teleport'"));
        assert!(msg.contains("search, calculator"));
    }

    #[test]
    fn test_parse_error_converts() {
        let err: AgentError = OutputParseError::new("Invalid Format", "garbage").into();
        assert!(matches!(err, AgentError::Parse(_)));
        assert!(err.to_string().contains("garbage"));
    }
}
