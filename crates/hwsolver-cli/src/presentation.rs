//! Text rendering for the interactive session.
//!
//! Format-only: every function takes domain values and returns the text to
//! print.

use std::fmt::Write as _;

use chrono::{DateTime, Local, Utc};
use hwsolver_core::{HistoryItem, ResultOutcome, SolveResult};

pub const GENERAL_TIP: &str = "If you want a more direct answer, try adding specific keywords, dates, or an explicit math expression.";

pub const NO_HISTORY: &str = "No history yet.";

/// Render a solve result with its explanation, sources and hints.
pub fn format_result(result: &SolveResult, outcome: ResultOutcome) -> String {
    let mut out = String::new();
    let heading = match outcome {
        ResultOutcome::Succeeded => "Answer",
        ResultOutcome::Failed => "Error",
    };
    let _ = writeln!(out, "{heading}: {}", result.answer);

    if let Some(explanation) = result.explanation_text() {
        let _ = writeln!(out, "Explanation: {explanation}");
    }

    if !result.sources.is_empty() {
        out.push_str("Sources:\n");
        for (i, source) in result.sources.iter().enumerate() {
            let _ = writeln!(out, "  {}. {source}", i + 1);
        }
    }

    if result.is_general() {
        let _ = writeln!(out, "Tip: {GENERAL_TIP}");
    }

    out
}

/// Render the history listing, newest first as given.
///
/// Items without a stored time are stamped with `now`.
pub fn format_history(items: &[HistoryItem], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return format!("{NO_HISTORY}\n");
    }

    let mut out = String::new();
    for item in items {
        let stamp = item.timestamp().unwrap_or(now).with_timezone(&Local);
        let _ = writeln!(out, "[{}]", stamp.format("%Y-%m-%d %H:%M:%S"));
        let _ = writeln!(out, "  Q: {}", item.question);
        let _ = writeln!(out, "  A: {}", item.answer);
    }
    out
}

/// Render voice labels, marking the selected index.
pub fn format_voices(labels: &[String], selected: usize) -> String {
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate() {
        let marker = if i == selected { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {i}: {label}");
    }
    out
}
