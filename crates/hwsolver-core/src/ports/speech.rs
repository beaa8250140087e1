//! Speech synthesis port.
//!
//! Models the host platform's single, shared synthesis engine. The core never
//! touches the platform directly: [`crate::speech::SpeechController`] is the
//! only caller of [`SpeechSynthesizer`].
//!
//! `speak` returns as soon as playback is queued. When playback ends (or
//! fails) the platform consumes the [`NarrationSignal`] it was handed.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::VoiceDescriptor;

/// Identifies one narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NarrationId(pub(crate) u64);

impl fmt::Display for NarrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "narration-{}", self.0)
    }
}

/// A single playback request.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` means the platform default voice.
    pub voice: Option<VoiceDescriptor>,
    pub rate: f32,
    pub pitch: f32,
}

/// How a narration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrationOutcome {
    /// Playback ran to completion or was interrupted by `cancel`.
    Completed,
    /// The platform reported a playback error.
    Failed(String),
}

/// Completion notice delivered back to the speech controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrationEnded {
    pub id: NarrationId,
    pub outcome: NarrationOutcome,
}

/// One-shot completion handle handed to the platform with each utterance.
#[derive(Debug)]
pub struct NarrationSignal {
    id: NarrationId,
    tx: mpsc::UnboundedSender<NarrationEnded>,
}

impl NarrationSignal {
    pub(crate) const fn new(id: NarrationId, tx: mpsc::UnboundedSender<NarrationEnded>) -> Self {
        Self { id, tx }
    }

    pub const fn id(&self) -> NarrationId {
        self.id
    }

    /// Report the end of playback.
    ///
    /// Silently dropped if the controller is gone.
    pub fn finish(self, outcome: NarrationOutcome) {
        let _ = self.tx.send(NarrationEnded {
            id: self.id,
            outcome,
        });
    }
}

/// Errors reported by the speech platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// Speech synthesis is not supported on this host.
    #[error("Speech synthesis is not available")]
    Unavailable,

    /// The platform refused or failed the request.
    #[error("Speech playback failed: {0}")]
    Playback(String),
}

/// Host speech synthesis engine.
#[cfg_attr(test, mockall::automock)]
pub trait SpeechSynthesizer: Send + Sync {
    /// Whether synthesis is supported at all.
    fn is_available(&self) -> bool;

    /// Queue an utterance. `signal` must be finished exactly once when
    /// playback ends; dropping it unfinished leaves the narration active
    /// until the next `cancel`.
    fn speak(&self, utterance: Utterance, signal: NarrationSignal) -> Result<(), SpeechError>;

    /// Stop all playback immediately.
    fn cancel(&self) -> Result<(), SpeechError>;
}

/// Synthesizer for hosts without speech support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSynthesizer;

impl SpeechSynthesizer for UnavailableSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&self, _utterance: Utterance, _signal: NarrationSignal) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }

    fn cancel(&self) -> Result<(), SpeechError> {
        Err(SpeechError::Unavailable)
    }
}
