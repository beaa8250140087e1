//! Wire types for the solver service API.

use serde::{Deserialize, Serialize};

/// Body of `POST /solve`.
#[derive(Debug, Serialize)]
pub struct SolveRequest<'a> {
    pub question: &'a str,
}

/// Response of `POST /solve`.
///
/// Only `answer` is required; `null` and missing optional fields are
/// treated alike.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveResponse {
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub qtype: Option<String>,
}

/// Response of `GET /history`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryResponse {
    /// Missing or `null` means an empty listing.
    #[serde(default)]
    pub items: Option<Vec<HistoryEntry>>,
}

/// One row of the history listing as sent by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
