//! Agent transcript (scratchpad)
//!
//! The transcript is the only state the agent carries between iterations.
//! Entries are appended in call order and never modified.

use serde::{Deserialize, Serialize};

use super::parser::AgentAction;

/// Tool name recorded for model outputs that failed to parse
pub const EXCEPTION_TOOL: &str = "_Exception";

/// One action and the observation it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub action: AgentAction,
    pub observation: String,
}

/// Ordered, append-only list of (action, observation) pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, action: AgentAction, observation: impl Into<String>) {
        self.entries.push(TranscriptEntry {
            action,
            observation: observation.into(),
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the transcript for the `{agent_scratchpad}` slot of the prompt
    ///
    /// Each entry contributes the model's raw step verbatim, then its
    /// observation, then a fresh `Thought: ` for the model to continue from.
    pub fn render_scratchpad(&self) -> String {
        let mut thoughts = String::new();
        for entry in &self.entries {
            thoughts.push_str(&entry.action.log);
            thoughts.push_str("\nObservation: ");
            thoughts.push_str(&entry.observation);
            thoughts.push_str("\nThought: ");
        }
        thoughts
    }
}

impl IntoIterator for Transcript {
    type Item = TranscriptEntry;
    type IntoIter = std::vec::IntoIter<TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_scratchpad() {
        assert_eq!(Transcript::new().render_scratchpad(), "");
    }

    #[test]
    fn test_scratchpad_keeps_order_and_logs_verbatim() {
        let mut transcript = Transcript::new();
        transcript.push(
            AgentAction::new("a", "1", " first step\nAction: a\nAction Input: 1"),
            "one",
        );
        transcript.push(AgentAction::new("b", "2", "Action: b\nAction Input: 2"), "two");

        assert_eq!(transcript.len(), 2);
        assert_eq!(
            transcript.render_scratchpad(),
            " first step\nAction: a\nAction Input: 1\nObservation: one\nThought: \
             Action: b\nAction Input: 2\nObservation: two\nThought: "
        );
        assert_eq!(transcript.entries()[1].observation, "two");
    }
}
