use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer shown when the solver could not be reached.
pub const FAILURE_ANSWER: &str = "Error contacting solver";

/// Rejected question text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The question was empty or whitespace-only.
    #[error("question is empty")]
    EmptyQuestion,
}

/// A user-authored question that passed validation.
///
/// The original text is kept verbatim; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    /// Validate question text.
    pub fn new(text: impl Into<String>) -> Result<Self, InvalidInput> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(InvalidInput::EmptyQuestion);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The answer returned by the solver (or synthesized on transport failure).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// The answer text.
    pub answer: String,
    /// Optional worked explanation.
    pub explanation: Option<String>,
    /// Reference URLs, in the order the solver returned them.
    pub sources: Vec<String>,
    /// Question classification (e.g. `"general"`, `"math"`).
    pub qtype: Option<String>,
}

impl SolveResult {
    /// Create a result carrying only an answer.
    pub fn answer(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            ..Self::default()
        }
    }

    /// Attach an explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Result displayed in place of an answer when the solve request failed.
    pub fn transport_failure(detail: impl fmt::Display) -> Self {
        Self::answer(FAILURE_ANSWER).with_explanation(detail.to_string())
    }

    /// Explanation text, if present and not blank.
    pub fn explanation_text(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Whether the solver classified the question as open-ended.
    pub fn is_general(&self) -> bool {
        self.qtype.as_deref() == Some("general")
    }

    /// Text to narrate for this result: `"{answer}. {explanation}"`.
    ///
    /// Returns `None` when the answer is blank.
    pub fn narration_text(&self) -> Option<String> {
        let answer = self.answer.trim();
        if answer.is_empty() {
            return None;
        }
        Some(match self.explanation_text() {
            Some(explanation) => format!("{answer}. {explanation}"),
            None => format!("{answer}."),
        })
    }
}

/// Canned prompts offered next to the question box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePrompt {
    Science,
    MathEval,
}

impl SamplePrompt {
    pub const ALL: [Self; 2] = [Self::Science, Self::MathEval];

    pub const fn text(self) -> &'static str {
        match self {
            Self::Science => "What is photosynthesis?",
            Self::MathEval => "Evaluate (2^3 + 4) * 5",
        }
    }

    /// Short label used by front ends.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::MathEval => "math",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label.trim()))
    }
}
