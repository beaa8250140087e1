use std::fmt;

use crate::domain::{HistoryItem, SolveResult};
use crate::speech::SpeechPhase;

/// Identifies one `submit`. Strictly increasing within a controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of the solve request.
///
/// A result exists exactly in the two resolved phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestPhase {
    #[default]
    Idle,
    Loading,
    Succeeded(SolveResult),
    Failed(SolveResult),
}

impl RequestPhase {
    pub const fn result(&self) -> Option<&SolveResult> {
        match self {
            Self::Succeeded(result) | Self::Failed(result) => Some(result),
            Self::Idle | Self::Loading => None,
        }
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Snapshot of everything the controller owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub question: String,
    pub phase: RequestPhase,
    pub history: Vec<HistoryItem>,
    pub auto_speak_enabled: bool,
    pub selected_voice_index: usize,
    pub speech_phase: SpeechPhase,
}

impl InteractionState {
    pub const fn result(&self) -> Option<&SolveResult> {
        self.phase.result()
    }
}
