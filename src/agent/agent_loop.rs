//! ReAct agent loop
//!
//! Each iteration renders the prompt with the transcript so far, asks the
//! model for one step, and either runs the requested tool or returns the
//! final answer:
//!
//! - Action → look up the tool, run it, append (action, observation), repeat
//! - Finish → return the answer; no further model or tool calls
//!
//! Model and tool calls never overlap.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use super::config::AgentConfig;
use super::parser::{self, AgentAction, AgentFinish, AgentStep, OUTPUT_KEY};
use super::transcript::{Transcript, EXCEPTION_TOOL};
use crate::cli::Console;
use crate::error::{AgentError, OutputParseError};
use crate::llm::LlmProvider;
use crate::structured::parse_structured;

/// Output returned when the iteration limit stops a run
pub const ITERATION_LIMIT_OUTPUT: &str = "Agent stopped due to iteration limit or time limit.";

/// Result of one agent run
#[derive(Debug, Clone, Serialize)]
pub struct AgentOutcome {
    pub run_id: Uuid,
    pub input: String,
    /// Named output fields; `output` holds the final answer text
    pub return_values: BTreeMap<String, String>,
    pub transcript: Transcript,
    /// Number of model calls made
    pub iterations: usize,
    /// Set when the iteration limit ended the run
    pub stopped_early: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl AgentOutcome {
    /// The final answer text
    pub fn output(&self) -> &str {
        self.return_values
            .get(OUTPUT_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Parse the final answer as structured JSON
    pub fn parse_output<T: DeserializeOwned>(&self) -> Result<T, OutputParseError> {
        parse_structured(self.output())
    }
}

/// Agent that runs the ReAct loop against a text-generation provider
pub struct ReactAgent {
    config: AgentConfig,
    llm: Arc<dyn LlmProvider>,
    console: Console,
}

impl ReactAgent {
    /// Create a new agent
    ///
    /// # Errors
    ///
    /// Returns `AgentError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: AgentConfig, llm: Arc<dyn LlmProvider>) -> Result<Self, AgentError> {
        config.validate()?;
        tracing::info!(
            "Creating ReAct agent ({} via {}) with tools: {}",
            llm.model(),
            llm.provider_name(),
            config.tools.tool_names()
        );

        let console = Console::new(config.verbose);
        Ok(Self {
            config,
            llm,
            console,
        })
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Run the loop for `input` until the model gives a final answer
    pub async fn invoke(&self, input: &str) -> Result<AgentOutcome, AgentError> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("agent_run", %run_id);
        self.run(run_id, input).instrument(span).await
    }

    async fn run(&self, run_id: Uuid, input: &str) -> Result<AgentOutcome, AgentError> {
        let started_at = Utc::now();
        tracing::info!("Starting agent run: {}", input);
        self.console.print_chain_start();

        let mut transcript = Transcript::new();
        let mut iterations = 0;
        let mut parse_retries_left = self.config.parse_retries;

        loop {
            if let Some(max) = self.config.max_iterations {
                if iterations >= max {
                    tracing::warn!("Maximum iterations reached ({})", max);
                    self.console
                        .print_system("Maximum iterations reached. Stopping.");
                    self.console.print_chain_end();

                    let finish = AgentFinish::with_output(ITERATION_LIMIT_OUTPUT, "");
                    return Ok(AgentOutcome {
                        run_id,
                        input: input.to_string(),
                        return_values: finish.return_values,
                        transcript,
                        iterations,
                        stopped_early: true,
                        started_at,
                        finished_at: Utc::now(),
                    });
                }
            }
            iterations += 1;

            let output = self.plan(input, &transcript).await?;
            self.console.print_step(&output);

            match parser::parse(&output) {
                Ok(AgentStep::Finish(finish)) => {
                    tracing::info!("Agent finished after {} iterations", iterations);
                    self.console.print_chain_end();

                    return Ok(AgentOutcome {
                        run_id,
                        input: input.to_string(),
                        return_values: finish.return_values,
                        transcript,
                        iterations,
                        stopped_early: false,
                        started_at,
                        finished_at: Utc::now(),
                    });
                }
                Ok(AgentStep::Action(action)) => {
                    let observation = self.dispatch(&action).await?;
                    transcript.push(action, observation);
                }
                Err(err) if parse_retries_left > 0 => {
                    parse_retries_left -= 1;
                    tracing::warn!(
                        "Unparsable model output, re-prompting ({} retries left): {}",
                        parse_retries_left,
                        err.message
                    );
                    self.console.print_observation(&err.message, true);
                    let action = AgentAction::new(EXCEPTION_TOOL, err.message.clone(), output);
                    transcript.push(action, err.message);
                }
                Err(err) => {
                    tracing::error!("Unparsable model output: {}", err);
                    return Err(err.into());
                }
            }
        }
    }

    /// Ask the model for the next step given the transcript so far
    pub async fn plan(&self, input: &str, transcript: &Transcript) -> Result<String, AgentError> {
        let prompt = self
            .config
            .prompt
            .render(input, &self.config.tools, &transcript.render_scratchpad());
        tracing::debug!("Prompt:\n{}", prompt);

        let output = self
            .llm
            .generate(&prompt, &self.config.stop)
            .await
            .map_err(AgentError::Llm)?;
        tracing::debug!("Model output:\n{}", output);

        Ok(output)
    }

    /// Run the tool an action names and return its observation
    ///
    /// Fails without calling anything if the tool is not registered.
    pub async fn dispatch(&self, action: &AgentAction) -> Result<String, AgentError> {
        let tool = self.config.tools.lookup(&action.tool)?;
        tracing::info!("Invoking: `{}` with `{}`", action.tool, action.tool_input);

        let result = tool
            .execute(&action.tool_input)
            .await
            .map_err(|source| {
                tracing::error!("Tool {} failed: {:?}", action.tool, source);
                AgentError::Tool {
                    name: action.tool.clone(),
                    source,
                }
            })?;

        if result.is_error {
            tracing::warn!("Tool {} reported an error: {}", action.tool, result.output);
        }
        self.console.print_observation(&result.output, result.is_error);

        Ok(result.output)
    }
}
