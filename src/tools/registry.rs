//! Fixed tool registry
//!
//! The registry is built once from a list of tools and never changes
//! afterwards. Tool names coming from model output are only ever resolved
//! through [`ToolRegistry::lookup`], an exact match against this closed set.

use std::collections::HashMap;
use std::sync::Arc;

use super::tool::Tool;
use crate::error::AgentError;

/// Immutable name → tool mapping
#[derive(Clone)]
pub struct ToolRegistry {
    /// Registration order, used for prompt rendering
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Build a registry from a fixed list of tools
    ///
    /// Fails if two tools share a name.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, AgentError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (i, tool) in tools.iter().enumerate() {
            let name = tool.name().to_string();
            if name.trim().is_empty() {
                return Err(AgentError::InvalidConfig(
                    "tool names must not be empty".to_string(),
                ));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(AgentError::InvalidConfig(format!(
                    "duplicate tool name: {}",
                    name
                )));
            }
        }

        tracing::debug!("Tool registry built with {} tools", tools.len());
        Ok(Self { tools, index })
    }

    /// Look up a tool by exact name
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn Tool>, AgentError> {
        match self.index.get(name) {
            Some(&i) => Ok(Arc::clone(&self.tools[i])),
            None => {
                tracing::warn!("Unknown tool requested: {}", name);
                Err(AgentError::UnknownTool {
                    name: name.to_string(),
                    available: self.names(),
                })
            }
        }
    }

    /// Check whether a tool with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// Comma-separated tool names for the `Action:` line of the prompt
    pub fn tool_names(&self) -> String {
        self.names().join(", ")
    }

    /// One `name: description` line per tool
    pub fn render_descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|t| format!("{}: {}", t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{FnTool, TextLengthTool};

    fn registry() -> ToolRegistry {
        ToolRegistry::new(vec![
            Arc::new(TextLengthTool::new()),
            Arc::new(FnTool::new("echo", "Repeats its input", |s: &str| {
                Ok(s.to_string())
            })),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_exact_name() {
        let registry = registry();
        assert_eq!(registry.lookup("echo").unwrap().name(), "echo");
        assert!(registry.contains("get_text_length"));
        // Matching is exact, not case-insensitive
        assert!(!registry.contains("Echo"));
    }

    #[test]
    fn test_lookup_unknown_names_requested_tool() {
        let err = registry().lookup("rm_rf").err().unwrap();
        match err {
            AgentError::UnknownTool { name, available } => {
                assert_eq!(name, "rm_rf");
                assert_eq!(available, vec!["get_text_length", "echo"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ToolRegistry::new(vec![
            Arc::new(TextLengthTool::new()),
            Arc::new(TextLengthTool::new()),
        ]);
        assert!(matches!(result, Err(AgentError::InvalidConfig(_))));
    }

    #[test]
    fn test_rendering_keeps_registration_order() {
        let registry = registry();
        assert_eq!(registry.tool_names(), "get_text_length, echo");
        let rendered = registry.render_descriptions();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("get_text_length: "));
        assert_eq!(lines[1], "echo: Repeats its input");
    }
}
