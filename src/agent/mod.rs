pub mod agent_loop;
pub mod config;
pub mod parser;
pub mod prompt;
pub mod transcript;

pub use agent_loop::{AgentOutcome, ReactAgent, ITERATION_LIMIT_OUTPUT};
pub use config::{AgentConfig, DEFAULT_STOP};
pub use parser::{parse, AgentAction, AgentFinish, AgentStep};
pub use prompt::{ReactPrompt, REACT_PROMPT, REACT_PROMPT_WITH_FORMAT_INSTRUCTIONS};
pub use transcript::{Transcript, TranscriptEntry};
