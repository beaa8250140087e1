use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A previously answered question, as listed by the solver service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl HistoryItem {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Creation time, falling back to the last update time.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.created_at.or(self.updated_at)
    }
}
