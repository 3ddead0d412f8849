//! ReAct output grammar
//!
//! A model step is either
//!
//! ```text
//! Thought: ...
//! Action: <tool name>
//! Action Input: <text>
//! ```
//!
//! or
//!
//! ```text
//! Thought: I now know the final answer
//! Final Answer: <text>
//! ```
//!
//! [`parse`] classifies raw model text into one of the two, or fails.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::OutputParseError;

/// Marker that introduces the final answer
pub const FINAL_ANSWER_ACTION: &str = "Final Answer:";
/// Key of the single field in a finish mapping
pub const OUTPUT_KEY: &str = "output";

const MISSING_ACTION_AFTER_THOUGHT: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
const MISSING_ACTION_INPUT_AFTER_ACTION: &str =
    "Invalid Format: Missing 'Action Input:' after 'Action:'";
const FINAL_ANSWER_AND_PARSABLE_ACTION: &str =
    "Parsing LLM output produced both a final answer and a parse-able action";
const UNPARSABLE: &str = "Could not parse LLM output";

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    /// Tool name as written after `Action:`
    pub tool: String,
    /// Text written after `Action Input:`
    pub tool_input: String,
    /// The raw model output this action was parsed from
    pub log: String,
}

impl AgentAction {
    pub fn new(tool: impl Into<String>, tool_input: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            tool_input: tool_input.into(),
            log: log.into(),
        }
    }
}

/// The model's final answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFinish {
    pub return_values: BTreeMap<String, String>,
    pub log: String,
}

impl AgentFinish {
    /// Finish with a single `output` field
    pub fn with_output(output: impl Into<String>, log: impl Into<String>) -> Self {
        let mut return_values = BTreeMap::new();
        return_values.insert(OUTPUT_KEY.to_string(), output.into());
        Self {
            return_values,
            log: log.into(),
        }
    }

    pub fn output(&self) -> Option<&str> {
        self.return_values.get(OUTPUT_KEY).map(String::as_str)
    }
}

/// One parsed model step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStep {
    Action(AgentAction),
    Finish(AgentFinish),
}

fn action_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*:[\s]*(.*?)[\s]*Action\s*\d*\s*Input\s*\d*\s*:[\s]*(.*)")
            .expect("action regex is valid")
    })
}

fn action_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)Action\s*\d*\s*:").expect("action line regex is valid"))
}

fn action_input_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Action\s*\d*\s*Input\s*\d*\s*:").expect("action input regex is valid")
    })
}

/// Classify raw model output as an action or a final answer
pub fn parse(text: &str) -> Result<AgentStep, OutputParseError> {
    let includes_answer = text.contains(FINAL_ANSWER_ACTION);

    if let Some(caps) = action_regex().captures(text) {
        if includes_answer {
            return Err(OutputParseError::new(FINAL_ANSWER_AND_PARSABLE_ACTION, text));
        }

        let tool = caps.get(1).map_or("", |m| m.as_str()).trim();
        let tool_input = caps
            .get(2)
            .map_or("", |m| m.as_str())
            .trim()
            .trim_matches('"');

        if tool.is_empty() {
            return Err(OutputParseError::new(MISSING_ACTION_AFTER_THOUGHT, text));
        }

        return Ok(AgentStep::Action(AgentAction::new(tool, tool_input, text)));
    }

    if includes_answer {
        let output = text
            .rsplit(FINAL_ANSWER_ACTION)
            .next()
            .unwrap_or_default()
            .trim();
        return Ok(AgentStep::Finish(AgentFinish::with_output(output, text)));
    }

    if !action_line_regex().is_match(text) {
        Err(OutputParseError::new(MISSING_ACTION_AFTER_THOUGHT, text))
    } else if !action_input_regex().is_match(text) {
        Err(OutputParseError::new(MISSING_ACTION_INPUT_AFTER_ACTION, text))
    } else {
        Err(OutputParseError::new(UNPARSABLE, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(text: &str) -> AgentAction {
        match parse(text) {
            Ok(AgentStep::Action(action)) => action,
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_action() {
        let text = "Action: get_text_length\nAction Input: DOG";
        let action = action(text);
        assert_eq!(action.tool, "get_text_length");
        assert_eq!(action.tool_input, "DOG");
        assert_eq!(action.log, text);
    }

    #[test]
    fn test_parse_action_with_thought_and_padding() {
        let action = action(
            "I need the length of the word.\nAction:   get_text_length  \nAction Input:   \"DOG\"  \n",
        );
        assert_eq!(action.tool, "get_text_length");
        assert_eq!(action.tool_input, "DOG");
    }

    #[test]
    fn test_parse_numbered_action() {
        let action = action("Action 1: tavily_search\nAction 1 Input 1: weather Mar del Plata");
        assert_eq!(action.tool, "tavily_search");
        assert_eq!(action.tool_input, "weather Mar del Plata");
    }

    #[test]
    fn test_parse_multiline_input() {
        let action = action("Action: echo\nAction Input: line one\nline two");
        assert_eq!(action.tool_input, "line one\nline two");
    }

    #[test]
    fn test_parse_final_answer() {
        let text = "Thought: I now know the final answer\nFinal Answer: The word DOG has 3 letters.";
        match parse(text).unwrap() {
            AgentStep::Finish(finish) => {
                assert_eq!(finish.return_values.len(), 1);
                assert_eq!(finish.output(), Some("The word DOG has 3 letters."));
                assert_eq!(finish.log, text);
            }
            other => panic!("expected finish, got {:?}", other),
        }
    }

    #[test]
    fn test_final_answer_uses_last_marker() {
        match parse("Final Answer: draft\nFinal Answer: real").unwrap() {
            AgentStep::Finish(finish) => assert_eq!(finish.output(), Some("real")),
            other => panic!("expected finish, got {:?}", other),
        }
    }

    #[test]
    fn test_both_answer_and_action_is_error() {
        let err = parse("Action: search\nAction Input: x\nFinal Answer: y").unwrap_err();
        assert_eq!(err.message, FINAL_ANSWER_AND_PARSABLE_ACTION);
    }

    #[test]
    fn test_missing_action() {
        let err = parse("I am just thinking out loud.").unwrap_err();
        assert_eq!(err.message, MISSING_ACTION_AFTER_THOUGHT);
        assert_eq!(err.output, "I am just thinking out loud.");
    }

    #[test]
    fn test_missing_action_input() {
        let err = parse("Thought: search it\nAction: tavily_search").unwrap_err();
        assert_eq!(err.message, MISSING_ACTION_INPUT_AFTER_ACTION);
    }

    #[test]
    fn test_empty_tool_name() {
        let err = parse("Action: \nAction Input: x").unwrap_err();
        assert_eq!(err.message, MISSING_ACTION_AFTER_THOUGHT);
    }
}
