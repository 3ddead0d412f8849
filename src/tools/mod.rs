//! Tool system for the agent
//!
//! This module provides the Tool trait and ToolRegistry for managing
//! tools that the agent can use.

mod function;
mod registry;
pub mod retriever_tool;
pub mod text_length;
mod tool;
pub mod web_search;

pub use function::FnTool;
pub use registry::ToolRegistry;
pub use retriever_tool::RetrieverTool;
pub use text_length::TextLengthTool;
pub use tool::{Tool, ToolResult};
pub use web_search::TavilySearchTool;
