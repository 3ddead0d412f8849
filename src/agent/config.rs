//! Configuration for the ReAct agent.

use std::sync::Arc;

use super::prompt::ReactPrompt;
use crate::config::DEFAULT_MAX_ITERATIONS;
use crate::error::AgentError;
use crate::tools::ToolRegistry;

/// Stop sequence that keeps the model from writing its own observation
pub const DEFAULT_STOP: &str = "\nObservation";

/// Configuration for [`ReactAgent`](super::ReactAgent)
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Tools the agent may call
    pub tools: Arc<ToolRegistry>,

    /// Prompt template
    pub prompt: ReactPrompt,

    /// Maximum number of model calls per run, `None` for no limit
    ///
    /// Default: 15
    pub max_iterations: Option<usize>,

    /// How many unparsable model outputs to feed back before failing
    ///
    /// Default: 0 (the first parse failure ends the run)
    pub parse_retries: usize,

    /// Stop sequences sent with every model call
    ///
    /// Default: `["\nObservation"]`
    pub stop: Vec<String>,

    /// Print the step-by-step trace to the console
    ///
    /// Default: true
    pub verbose: bool,
}

impl AgentConfig {
    /// Create a config with default settings for the given tools
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools: Arc::new(tools),
            prompt: ReactPrompt::default(),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            parse_retries: 0,
            stop: vec![DEFAULT_STOP.to_string()],
            verbose: true,
        }
    }

    pub fn with_prompt(mut self, prompt: ReactPrompt) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_parse_retries(mut self, retries: usize) -> Self {
        self.parse_retries = retries;
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AgentError> {
        let mut errors = Vec::new();

        if self.tools.is_empty() {
            errors.push("tools cannot be empty".to_string());
        }
        if self.max_iterations == Some(0) {
            errors.push("max_iterations must be greater than 0".to_string());
        }
        if self.stop.iter().any(|s| s.is_empty()) {
            errors.push("stop sequences cannot be empty strings".to_string());
        }
        if let Err(AgentError::InvalidConfig(msg)) = self.prompt.validate() {
            errors.push(msg);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AgentError::InvalidConfig(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::TextLengthTool;

    fn tools() -> ToolRegistry {
        ToolRegistry::new(vec![Arc::new(TextLengthTool::new())]).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AgentConfig::new(tools());
        assert_eq!(config.max_iterations, Some(15));
        assert_eq!(config.stop, vec!["\nObservation".to_string()]);
        assert_eq!(config.parse_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_tools_rejected() {
        let config = AgentConfig::new(ToolRegistry::new(Vec::new()).unwrap());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = AgentConfig::new(tools())
            .with_max_iterations(Some(0))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_iterations"));
    }

    #[test]
    fn test_unbounded_allowed() {
        assert!(AgentConfig::new(tools())
            .with_max_iterations(None)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_bad_prompt_reported() {
        let err = AgentConfig::new(tools())
            .with_prompt(ReactPrompt::new("{input}"))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("{agent_scratchpad}"));
    }
}
