//! Narration lifecycle on top of the host speech port.
//!
//! At most one narration is active at a time. Starting a new one always
//! cancels the previous one first, and an ending reported for anything but
//! the current narration is ignored, so a late completion from a cancelled
//! utterance can never flip a newer narration back to idle.
//!
//! ```text
//!   Idle ──speak──► Speaking ──ended / cancel──► Idle
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::VoiceDescriptor;
use crate::ports::{
    NarrationEnded, NarrationId, NarrationOutcome, NarrationSignal, SpeechSynthesizer, Utterance,
};

/// Whether a narration is currently playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechPhase {
    #[default]
    Idle,
    Speaking,
}

impl SpeechPhase {
    pub const fn is_speaking(self) -> bool {
        matches!(self, Self::Speaking)
    }
}

/// Owns the single active narration.
pub struct SpeechController {
    synth: Arc<dyn SpeechSynthesizer>,
    phase: SpeechPhase,
    current: Option<NarrationId>,
    next_id: u64,
    rate: f32,
    pitch: f32,
    ended_tx: mpsc::UnboundedSender<NarrationEnded>,
    ended_rx: mpsc::UnboundedReceiver<NarrationEnded>,
}

impl SpeechController {
    /// Create a controller with neutral rate and pitch.
    pub fn new(synth: Arc<dyn SpeechSynthesizer>) -> Self {
        Self::with_prosody(synth, 1.0, 1.0)
    }

    pub fn with_prosody(synth: Arc<dyn SpeechSynthesizer>, rate: f32, pitch: f32) -> Self {
        let (ended_tx, ended_rx) = mpsc::unbounded_channel();
        Self {
            synth,
            phase: SpeechPhase::Idle,
            current: None,
            next_id: 0,
            rate,
            pitch,
            ended_tx,
            ended_rx,
        }
    }

    pub const fn phase(&self) -> SpeechPhase {
        self.phase
    }

    pub const fn is_speaking(&self) -> bool {
        self.phase.is_speaking()
    }

    /// The narration currently playing, if any.
    pub const fn current(&self) -> Option<NarrationId> {
        self.current
    }

    /// Start narrating `text`, replacing any narration in progress.
    ///
    /// `voice = None` leaves the choice to the platform. Returns `None` when
    /// synthesis is unavailable or the platform rejected the utterance; the
    /// phase is `Idle` in both cases.
    pub fn speak(&mut self, text: &str, voice: Option<VoiceDescriptor>) -> Option<NarrationId> {
        if !self.synth.is_available() {
            tracing::debug!("Speech synthesis unavailable, skipping narration");
            return None;
        }

        self.cancel();

        self.next_id += 1;
        let id = NarrationId(self.next_id);
        let utterance = Utterance {
            text: text.to_string(),
            voice,
            rate: self.rate,
            pitch: self.pitch,
        };

        self.phase = SpeechPhase::Speaking;
        self.current = Some(id);

        let signal = NarrationSignal::new(id, self.ended_tx.clone());
        if let Err(e) = self.synth.speak(utterance, signal) {
            tracing::warn!(narration = %id, error = %e, "Speech platform rejected narration");
            self.phase = SpeechPhase::Idle;
            self.current = None;
            return None;
        }

        tracing::debug!(narration = %id, chars = text.len(), "Narration started");
        Some(id)
    }

    /// Stop the current narration.
    ///
    /// Returns the narration that was stopped, or `None` if already idle.
    pub fn cancel(&mut self) -> Option<NarrationId> {
        if self.phase == SpeechPhase::Idle {
            return None;
        }

        if let Err(e) = self.synth.cancel() {
            tracing::debug!(error = %e, "Speech cancel failed, treating as stopped");
        }

        self.phase = SpeechPhase::Idle;
        let stopped = self.current.take();
        if let Some(id) = stopped {
            tracing::debug!(narration = %id, "Narration cancelled");
        }
        stopped
    }

    /// Apply a completion notice from the platform.
    ///
    /// Returns the narration that ended if it was the current one.
    pub fn on_ended(&mut self, ended: NarrationEnded) -> Option<NarrationId> {
        if self.current != Some(ended.id) {
            tracing::debug!(narration = %ended.id, "Ignoring end of superseded narration");
            return None;
        }

        match ended.outcome {
            NarrationOutcome::Completed => {
                tracing::debug!(narration = %ended.id, "Narration finished");
            }
            NarrationOutcome::Failed(reason) => {
                tracing::warn!(narration = %ended.id, %reason, "Narration failed");
            }
        }

        self.phase = SpeechPhase::Idle;
        self.current.take()
    }

    /// Wait for the next completion notice.
    ///
    /// Cancel-safe; pending forever if nothing is playing.
    pub async fn next_ended(&mut self) -> Option<NarrationEnded> {
        self.ended_rx.recv().await
    }

    /// Take a completion notice if one is already queued.
    pub fn try_next_ended(&mut self) -> Option<NarrationEnded> {
        self.ended_rx.try_recv().ok()
    }
}
