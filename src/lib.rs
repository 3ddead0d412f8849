//! ReAct agent with tool dispatch, web search and retrieval-augmented answering
//!
//! The core is [`agent::ReactAgent`]: it prompts a text-generation
//! provider with the ReAct grammar, parses each step, runs the named tool
//! from a fixed registry and feeds the observation back until the model
//! produces a final answer.
//!
//! ```ignore
//! let settings = Settings::from_env()?;
//! let llm = Arc::new(OpenAiProvider::from_settings(&settings.openai)?);
//! let tools = ToolRegistry::new(vec![Arc::new(TextLengthTool::new())])?;
//! let agent = ReactAgent::new(AgentConfig::new(tools), llm)?;
//! let outcome = agent.invoke("What is the length of the word DOG?").await?;
//! println!("{}", outcome.output());
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod retrieval;
pub mod structured;
pub mod tools;

pub use agent::{AgentConfig, AgentOutcome, ReactAgent};
pub use config::Settings;
pub use error::{AgentError, OutputParseError};
