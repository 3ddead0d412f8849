//! Exposes a retriever as an agent tool

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::tool::{Tool, ToolResult};
use crate::retrieval::{format_docs, Retriever};

/// Tool whose observation is the formatted retrieved documents
pub struct RetrieverTool {
    name: String,
    description: String,
    retriever: Arc<dyn Retriever>,
}

impl RetrieverTool {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        retriever: Arc<dyn Retriever>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            retriever,
        }
    }
}

#[async_trait]
impl Tool for RetrieverTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &str) -> Result<ToolResult> {
        let docs = self.retriever.retrieve(input.trim()).await?;
        if docs.is_empty() {
            return Ok(ToolResult::error("No relevant documents found."));
        }
        Ok(ToolResult::success(format_docs(&docs)))
    }
}
