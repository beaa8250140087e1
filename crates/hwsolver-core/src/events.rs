//! Events emitted by the interaction controller.
//!
//! Front ends render from these; they never poll controller state to find
//! out what changed.

use crate::controller::RequestId;
use crate::domain::{HistoryItem, SolveResult, VoiceDescriptor};
use crate::ports::NarrationId;

/// How a solve request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultOutcome {
    /// The solver returned a well-formed answer.
    Succeeded,
    /// The request failed; the result is the synthetic error answer.
    Failed,
}

/// Events emitted by [`crate::InteractionController`].
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// A question was accepted and the solve request issued.
    Loading { request_id: RequestId },

    /// The displayed result changed. Emitted exactly once per resolved submit
    /// (superseded responses are dropped without an event).
    ResultChanged {
        request_id: RequestId,
        outcome: ResultOutcome,
        result: SolveResult,
    },

    /// The history list was replaced.
    HistoryUpdated { items: Vec<HistoryItem> },

    /// A narration started playing.
    SpeechStarted { narration: NarrationId, text: String },

    /// A narration stopped (finished, failed, or cancelled).
    SpeechStopped { narration: NarrationId },

    /// The host published a new voice catalog.
    VoicesChanged { voices: Vec<VoiceDescriptor> },
}
