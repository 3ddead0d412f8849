//! Structured final answers
//!
//! The agent can be asked to give its final answer as JSON matching
//! [`AgentResponse`]; [`parse_structured`] pulls that JSON back out of the
//! model's text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::OutputParseError;

/// A source the agent used for its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// The URL of the source
    pub url: String,
}

/// Final answer with the sources it is based on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent's answer to the query
    pub answer: String,
    /// Sources used to generate the answer
    #[serde(default)]
    pub sources: Vec<Source>,
}

impl AgentResponse {
    /// Instructions telling the model how to format an `AgentResponse`
    pub fn format_instructions() -> String {
        let schema = serde_json::json!({
            "properties": {
                "answer": {
                    "description": "The agent's answer to the query",
                    "type": "string"
                },
                "sources": {
                    "description": "List of sources used to generate the answer",
                    "type": "array",
                    "items": {
                        "properties": {
                            "url": {"description": "The URL of the source", "type": "string"}
                        },
                        "required": ["url"]
                    }
                }
            },
            "required": ["answer"]
        });

        format!(
            "The output should be formatted as a JSON instance that conforms to the JSON schema below.\n\n\
             Here is the output schema:\n```\n{}\n```",
            schema
        )
    }
}

/// Find the JSON object in model text
///
/// Prefers a fenced ```json block, falls back to the outermost braces.
fn extract_json(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Deserialize the JSON object embedded in `text`
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, OutputParseError> {
    let json = extract_json(text)
        .ok_or_else(|| OutputParseError::new("No JSON object found in output", text))?;

    serde_json::from_str(json).map_err(|e| {
        OutputParseError::new(
            format!("Failed to parse {}: {}", std::any::type_name::<T>(), e),
            text,
        )
    })
}
