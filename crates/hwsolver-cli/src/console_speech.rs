//! Console speech platform.
//!
//! Stands in for a system text-to-speech engine. The session prints the
//! narration text; this synthesizer only paces it, signalling completion
//! once the text would have been read aloud at the configured speed.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use hwsolver_core::{
    NarrationOutcome, NarrationSignal, SpeechError, SpeechSynthesizer, Utterance,
    VoiceDescriptor,
};
use tokio::task::AbortHandle;

/// Voices offered by the console platform.
pub fn console_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("Alex", "en-US"),
        VoiceDescriptor::new("Daniel", "en-GB"),
        VoiceDescriptor::new("Amelie", "fr-CA"),
    ]
}

/// Paced, silent narration on a tokio timer.
pub struct ConsoleSynthesizer {
    words_per_minute: u32,
    /// Completion timer of the narration in progress.
    pending: Mutex<Option<AbortHandle>>,
}

impl ConsoleSynthesizer {
    pub fn new(words_per_minute: u32) -> Self {
        Self {
            words_per_minute: words_per_minute.max(1),
            pending: Mutex::new(None),
        }
    }

    /// Time it takes to read `text` aloud.
    pub fn narration_duration(&self, text: &str) -> Duration {
        let words = text.split_whitespace().count().max(1) as u64;
        Duration::from_millis(words * 60_000 / u64::from(self.words_per_minute))
    }

    fn replace_pending(&self, next: Option<AbortHandle>) {
        let previous = std::mem::replace(
            &mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner),
            next,
        );
        if let Some(handle) = previous {
            handle.abort();
        }
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    fn speak(&self, utterance: Utterance, signal: NarrationSignal) -> Result<(), SpeechError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| SpeechError::Playback(e.to_string()))?;

        let duration = self.narration_duration(&utterance.text);
        tracing::debug!(
            narration = %signal.id(),
            voice = ?utterance.voice.as_ref().map(|v| v.name.as_str()),
            ?duration,
            "Console narration scheduled"
        );

        let task = runtime.spawn(async move {
            tokio::time::sleep(duration).await;
            signal.finish(NarrationOutcome::Completed);
        });
        self.replace_pending(Some(task.abort_handle()));
        Ok(())
    }

    fn cancel(&self) -> Result<(), SpeechError> {
        self.replace_pending(None);
        Ok(())
    }
}
