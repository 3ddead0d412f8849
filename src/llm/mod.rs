pub mod openai;
pub mod provider;
pub mod scripted;

pub use openai::OpenAiProvider;
pub use provider::LlmProvider;
pub use scripted::ScriptedProvider;
