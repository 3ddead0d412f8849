//! Text length tool
//!
//! Counts the characters of its input. Models tend to wrap the input in
//! quotes or leave a trailing newline, so those are stripped first.

use anyhow::Result;
use async_trait::async_trait;

use super::tool::{Tool, ToolResult};

/// Returns the length of a text by characters
#[derive(Debug, Default)]
pub struct TextLengthTool;

impl TextLengthTool {
    pub fn new() -> Self {
        Self
    }

    /// Strip surrounding whitespace, newlines and quotes, then count chars
    pub fn measure(text: &str) -> usize {
        let cleaned = text
            .trim_matches(|c: char| c == '\'' || c == '\n' || c.is_whitespace())
            .trim_matches('"');
        cleaned.chars().count()
    }
}

#[async_trait]
impl Tool for TextLengthTool {
    fn name(&self) -> &str {
        "get_text_length"
    }

    fn description(&self) -> &str {
        "Returns the length of a text by characters"
    }

    async fn execute(&self, input: &str) -> Result<ToolResult> {
        let length = Self::measure(input);
        tracing::debug!("get_text_length({:?}) = {}", input, length);
        Ok(ToolResult::success(length.to_string()))
    }
}
