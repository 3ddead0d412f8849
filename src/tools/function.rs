//! Closure-backed tools
//!
//! Wraps a plain `Fn(&str) -> Result<String>` so simple tools don't need a
//! dedicated type.

use anyhow::Result;
use async_trait::async_trait;

use super::tool::{Tool, ToolResult};

type ToolFn = dyn Fn(&str) -> Result<String> + Send + Sync;

/// A tool implemented by a synchronous closure
pub struct FnTool {
    name: String,
    description: String,
    func: Box<ToolFn>,
}

impl FnTool {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            func: Box::new(func),
        }
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn execute(&self, input: &str) -> Result<ToolResult> {
        (self.func)(input).map(ToolResult::success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fn_tool_executes_closure() {
        let tool = FnTool::new("upper", "Uppercases text", |s: &str| Ok(s.to_uppercase()));
        assert_eq!(tool.name(), "upper");
        assert_eq!(tool.description(), "Uppercases text");

        let result = tool.execute("dog").await.unwrap();
        assert_eq!(result, ToolResult::success("DOG"));
    }

    #[tokio::test]
    async fn test_fn_tool_propagates_error() {
        let tool = FnTool::new("fail", "Always fails", |_: &str| {
            Err(anyhow::anyhow!("boom"))
        });
        assert!(tool.execute("x").await.is_err());
    }
}
