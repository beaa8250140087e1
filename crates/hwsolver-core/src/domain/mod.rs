//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! transport or presentation concerns.
//!
//! # Structure
//!
//! - `solve` - Questions and solver results
//! - `history` - Previously answered questions
//! - `voice` - Host-supplied synthesis voices

mod history;
mod solve;
mod voice;

pub use history::HistoryItem;
pub use solve::{FAILURE_ANSWER, InvalidInput, Question, SamplePrompt, SolveResult};
pub use voice::VoiceDescriptor;
