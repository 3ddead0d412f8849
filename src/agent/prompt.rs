//! ReAct prompt templates
//!
//! Placeholders: `{tools}`, `{tool_names}`, `{input}`, `{agent_scratchpad}`
//! and, for the structured-response template, `{format_instructions}`.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use crate::error::AgentError;
use crate::tools::ToolRegistry;

/// The standard ReAct prompt
pub const REACT_PROMPT: &str = r#"Answer the following questions as best you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!

Question: {input}
Thought:{agent_scratchpad}"#;

/// ReAct prompt whose final answer must follow format instructions
pub const REACT_PROMPT_WITH_FORMAT_INSTRUCTIONS: &str = r#"Answer the following questions as best you can. You have access to the following tools:

{tools}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, should be one of [{tool_names}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question formatted according to format_instructions: {format_instructions}

Begin!

Question: {input}
Thought:{agent_scratchpad}"#;

/// A ReAct prompt template
#[derive(Debug, Clone)]
pub struct ReactPrompt {
    template: String,
    format_instructions: Option<String>,
}

impl ReactPrompt {
    /// Use a custom template
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            format_instructions: None,
        }
    }

    /// Standard template with final-answer format instructions filled in
    pub fn with_format_instructions(instructions: impl Into<String>) -> Self {
        Self {
            template: REACT_PROMPT_WITH_FORMAT_INSTRUCTIONS.to_string(),
            format_instructions: Some(instructions.into()),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Check that the template has every placeholder the loop fills
    pub fn validate(&self) -> Result<(), AgentError> {
        let mut errors = Vec::new();

        for placeholder in ["{input}", "{agent_scratchpad}", "{tools}", "{tool_names}"] {
            if !self.template.contains(placeholder) {
                errors.push(format!("template must contain {}", placeholder));
            }
        }
        if self.format_instructions.is_some() && !self.template.contains("{format_instructions}") {
            errors.push("template must contain {format_instructions}".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AgentError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Render the prompt for one iteration
    ///
    /// Placeholders are filled in one pass over the template, so braces in
    /// the question, tool descriptions or scratchpad are copied as-is.
    pub fn render(&self, input: &str, tools: &ToolRegistry, scratchpad: &str) -> String {
        let descriptions = tools.render_descriptions();
        let names = tools.tool_names();
        let instructions = self.format_instructions.as_deref().unwrap_or_default();

        placeholder_regex()
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "tools" => descriptions.clone(),
                "tool_names" => names.clone(),
                "format_instructions" => instructions.to_string(),
                "input" => input.to_string(),
                "agent_scratchpad" => scratchpad.to_string(),
                other => format!("{{{}}}", other),
            })
            .into_owned()
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{(tools|tool_names|format_instructions|input|agent_scratchpad)\}")
            .expect("placeholder regex is valid")
    })
}

impl Default for ReactPrompt {
    fn default() -> Self {
        Self::new(REACT_PROMPT)
    }
}
