//! Conversion from wire types to core domain types.

use chrono::{DateTime, NaiveDateTime, Utc};
use hwsolver_core::{HistoryItem, SolveResult};

use crate::models::{HistoryEntry, HistoryResponse, SolveResponse};

/// Parse a service timestamp.
///
/// Accepts RFC 3339, or a naive ISO 8601 date-time taken as UTC. Anything
/// else yields `None` and the item is shown without a stored time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

pub fn to_solve_result(response: SolveResponse) -> SolveResult {
    SolveResult {
        answer: response.answer,
        explanation: response.explanation,
        sources: response.sources.unwrap_or_default(),
        qtype: response.qtype,
    }
}

pub fn to_history_item(entry: HistoryEntry) -> HistoryItem {
    let created_at = entry.created_at.as_deref().and_then(parse_timestamp);
    let updated_at = entry.updated_at.as_deref().and_then(parse_timestamp);

    HistoryItem {
        id: entry.id,
        question: entry.question,
        answer: entry.answer,
        created_at,
        updated_at,
    }
}

/// Flatten a listing, keeping service order.
pub fn to_history_items(response: HistoryResponse) -> Vec<HistoryItem> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .map(to_history_item)
        .collect()
}
