//! Interaction controller: sequences solve, history and narration.
//!
//! ```text
//!   Idle ──submit──► Loading ──response──► Succeeded ─┐
//!                       ▲          └──failure──► Failed ─┤
//!                       └────────────submit──────────────┘
//! ```
//!
//! The controller owns all interaction state. Network calls run as spawned
//! tasks that report back through an inbox; [`InteractionController::process_next`]
//! applies one completion at a time, so every mutation is a single step
//! with respect to the event loop.
//!
//! # Ordering
//!
//! - `submit` cancels narration before the solve request is spawned.
//! - The history refresh for a submit is spawned only after that submit's
//!   solve response has been applied, and nothing waits for it.
//! - Every submit gets a fresh [`RequestId`]. A solve response for anything
//!   but the latest submit is dropped; a history listing older than the
//!   newest applied listing is dropped.

mod state;

pub use state::{InteractionState, RequestId, RequestPhase};

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::config::{ConfigError, ControllerConfig};
use crate::domain::{HistoryItem, Question, SolveResult, VoiceDescriptor};
use crate::events::{InteractionEvent, ResultOutcome};
use crate::ports::{HistoryPort, NarrationEnded, NarrationId, SolvePort, SpeechSynthesizer, TransportError};
use crate::speech::{SpeechController, SpeechPhase};
use crate::voices::VoiceRegistry;

/// Collaborators wired in by the composition root.
pub struct InteractionDeps {
    pub solver: Arc<dyn SolvePort>,
    pub history: Arc<dyn HistoryPort>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Host voice catalog.
    pub voices: watch::Receiver<Vec<VoiceDescriptor>>,
}

/// Results of spawned network calls, delivered back to the controller.
#[derive(Debug)]
enum Completion {
    Solved {
        request_id: RequestId,
        outcome: Result<SolveResult, TransportError>,
    },
    HistoryListed {
        ticket: u64,
        outcome: Result<Vec<HistoryItem>, TransportError>,
    },
}

/// Owns [`InteractionState`] and drives every transition of it.
pub struct InteractionController {
    question: String,
    phase: RequestPhase,
    history: Vec<HistoryItem>,
    auto_speak: bool,

    speech: SpeechController,
    voices: VoiceRegistry,
    voice_updates: Option<watch::Receiver<Vec<VoiceDescriptor>>>,

    solver: Arc<dyn SolvePort>,
    history_port: Arc<dyn HistoryPort>,

    /// Id of the most recent submit.
    latest_request: RequestId,
    /// Last history ticket handed out.
    history_ticket: u64,
    /// Newest history ticket whose listing was applied.
    applied_history: u64,
    /// Spawned network calls not yet applied.
    in_flight: usize,

    inbox_tx: mpsc::UnboundedSender<Completion>,
    inbox_rx: mpsc::UnboundedReceiver<Completion>,
    event_tx: mpsc::UnboundedSender<InteractionEvent>,
}

impl InteractionController {
    /// Create a controller in the initial state.
    ///
    /// Returns the controller and a receiver for [`InteractionEvent`]s.
    pub fn new(
        deps: InteractionDeps,
        config: &ControllerConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<InteractionEvent>), ConfigError> {
        let voices = VoiceRegistry::new(deps.voices, &config.voice_locale)?;
        let voice_updates = Some(voices.subscribe());
        let speech = SpeechController::with_prosody(deps.synthesizer, config.rate, config.pitch);

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let controller = Self {
            question: config.initial_question.clone(),
            phase: RequestPhase::Idle,
            history: Vec::new(),
            auto_speak: false,
            speech,
            voices,
            voice_updates,
            solver: deps.solver,
            history_port: deps.history,
            latest_request: RequestId::default(),
            history_ticket: 0,
            applied_history: 0,
            in_flight: 0,
            inbox_tx,
            inbox_rx,
            event_tx,
        };

        Ok((controller, event_rx))
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Snapshot of the full interaction state.
    pub fn state(&self) -> InteractionState {
        InteractionState {
            question: self.question.clone(),
            phase: self.phase.clone(),
            history: self.history.clone(),
            auto_speak_enabled: self.auto_speak,
            selected_voice_index: self.voices.selected_index(),
            speech_phase: self.speech.phase(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub const fn phase(&self) -> &RequestPhase {
        &self.phase
    }

    /// The displayed result, present once a request has resolved.
    pub const fn result(&self) -> Option<&SolveResult> {
        self.phase.result()
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub const fn auto_speak(&self) -> bool {
        self.auto_speak
    }

    pub const fn speech_phase(&self) -> SpeechPhase {
        self.speech.phase()
    }

    pub const fn voices(&self) -> &VoiceRegistry {
        &self.voices
    }

    /// Whether any spawned request has not been applied yet.
    pub const fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    // ── Commands ───────────────────────────────────────────────────

    /// Replace the draft question without submitting it.
    pub fn set_question(&mut self, text: impl Into<String>) {
        self.question = text.into();
    }

    /// Submit the draft question.
    pub fn submit_current(&mut self) -> Option<RequestId> {
        let text = self.question.clone();
        self.submit(text)
    }

    /// Submit a question to the solver.
    ///
    /// Blank questions are ignored: no request, no state change, no event.
    /// Otherwise narration is cancelled, the phase moves to `Loading`, and
    /// the solve request is spawned. The response is applied by
    /// [`Self::process_next`].
    pub fn submit(&mut self, text: impl Into<String>) -> Option<RequestId> {
        let question = match Question::new(text) {
            Ok(question) => question,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring submit");
                return None;
            }
        };

        self.stop_speech();

        self.latest_request = self.latest_request.next();
        let request_id = self.latest_request;
        self.question = question.as_str().to_string();
        self.phase = RequestPhase::Loading;
        self.emit(InteractionEvent::Loading { request_id });

        tracing::info!(%request_id, "Submitting question");

        let solver = Arc::clone(&self.solver);
        let inbox = self.inbox_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = solver.solve(&question).await;
            let _ = inbox.send(Completion::Solved {
                request_id,
                outcome,
            });
        });

        Some(request_id)
    }

    /// Fetch the history listing without submitting anything.
    ///
    /// Used once at startup; failures are swallowed.
    pub fn load_history(&mut self) {
        self.spawn_history_refresh();
    }

    /// Enable or disable automatic narration of new results.
    ///
    /// Only affects results that arrive afterwards; the result already on
    /// display is not narrated.
    pub fn set_auto_speak(&mut self, enabled: bool) {
        self.auto_speak = enabled;
        tracing::debug!(enabled, "Auto-speak toggled");
    }

    /// Select the voice for the next narration.
    ///
    /// A narration already playing keeps its voice.
    pub fn set_voice(&mut self, index: usize) -> bool {
        self.voices.select(index)
    }

    /// Narrate the displayed result on demand.
    pub fn speak_result(&mut self) -> Option<NarrationId> {
        let text = self.phase.result()?.narration_text()?;
        self.start_narration(&text)
    }

    /// Stop any narration in progress.
    pub fn stop_speech(&mut self) {
        if let Some(narration) = self.speech.cancel() {
            self.emit(InteractionEvent::SpeechStopped { narration });
        }
    }

    // ── Event loop ─────────────────────────────────────────────────

    /// Wait for the next completion and apply it.
    ///
    /// Handles solve and history responses, narration endings, and voice
    /// catalog updates. Cancel-safe: nothing is applied unless a message was
    /// received.
    pub async fn process_next(&mut self) {
        tokio::select! {
            biased;
            Some(completion) = self.inbox_rx.recv() => self.apply_completion(completion),
            Some(ended) = self.speech.next_ended() => self.apply_narration_end(ended),
            Some(voices) = next_catalog(&mut self.voice_updates) => {
                tracing::debug!(count = voices.len(), "Voice catalog updated");
                self.emit(InteractionEvent::VoicesChanged { voices });
            }
        }
    }

    /// Apply completions until no request is in flight.
    ///
    /// Narration endings that are already queued are applied as well; the
    /// narration itself is not waited for.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            self.process_next().await;
        }
        while let Some(ended) = self.speech.try_next_ended() {
            self.apply_narration_end(ended);
        }
    }

    // ── Internals ──────────────────────────────────────────────────

    fn apply_completion(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Solved {
                request_id,
                outcome,
            } => self.apply_solved(request_id, outcome),
            Completion::HistoryListed { ticket, outcome } => self.apply_history(ticket, outcome),
        }
    }

    fn apply_solved(&mut self, request_id: RequestId, outcome: Result<SolveResult, TransportError>) {
        if request_id == self.latest_request {
            let (outcome, result) = match outcome {
                Ok(result) => {
                    tracing::info!(%request_id, "Solver answered");
                    (ResultOutcome::Succeeded, result)
                }
                Err(e) => {
                    tracing::warn!(%request_id, error = %e, "Solve request failed");
                    (ResultOutcome::Failed, SolveResult::transport_failure(&e))
                }
            };

            self.phase = match outcome {
                ResultOutcome::Succeeded => RequestPhase::Succeeded(result.clone()),
                ResultOutcome::Failed => RequestPhase::Failed(result.clone()),
            };
            self.result_changed(request_id, outcome, result);
        } else {
            tracing::debug!(
                %request_id,
                latest = %self.latest_request,
                "Dropping response for superseded request"
            );
        }

        self.spawn_history_refresh();
    }

    /// Publish a `ResultChanged` event and run the auto-speak listener on it.
    fn result_changed(&mut self, request_id: RequestId, outcome: ResultOutcome, result: SolveResult) {
        let event = InteractionEvent::ResultChanged {
            request_id,
            outcome,
            result,
        };
        self.emit(event.clone());
        self.on_result_changed(&event);
    }

    fn on_result_changed(&mut self, event: &InteractionEvent) {
        let InteractionEvent::ResultChanged { result, .. } = event else {
            return;
        };
        if !self.auto_speak {
            return;
        }
        if let Some(text) = result.narration_text() {
            self.start_narration(&text);
        }
    }

    fn start_narration(&mut self, text: &str) -> Option<NarrationId> {
        self.stop_speech();
        let narration = self.speech.speak(text, self.voices.current())?;
        self.emit(InteractionEvent::SpeechStarted {
            narration,
            text: text.to_string(),
        });
        Some(narration)
    }

    fn apply_narration_end(&mut self, ended: NarrationEnded) {
        if let Some(narration) = self.speech.on_ended(ended) {
            self.emit(InteractionEvent::SpeechStopped { narration });
        }
    }

    fn spawn_history_refresh(&mut self) {
        self.history_ticket += 1;
        let ticket = self.history_ticket;
        let port = Arc::clone(&self.history_port);
        let inbox = self.inbox_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let outcome = port.refresh().await;
            let _ = inbox.send(Completion::HistoryListed { ticket, outcome });
        });
    }

    fn apply_history(&mut self, ticket: u64, outcome: Result<Vec<HistoryItem>, TransportError>) {
        match outcome {
            Ok(items) if ticket > self.applied_history => {
                tracing::debug!(ticket, count = items.len(), "History refreshed");
                self.applied_history = ticket;
                self.history = items.clone();
                self.emit(InteractionEvent::HistoryUpdated { items });
            }
            Ok(_) => {
                tracing::debug!(
                    ticket,
                    applied = self.applied_history,
                    "Dropping stale history listing"
                );
            }
            Err(e) => {
                tracing::debug!(ticket, error = %e, "History refresh failed, keeping previous list");
            }
        }
    }

    fn emit(&self, event: InteractionEvent) {
        let _ = self.event_tx.send(event);
    }
}

/// Next catalog snapshot, or pending forever once the host is gone.
async fn next_catalog(
    updates: &mut Option<watch::Receiver<Vec<VoiceDescriptor>>>,
) -> Option<Vec<VoiceDescriptor>> {
    let Some(rx) = updates.as_mut() else {
        return std::future::pending().await;
    };
    if rx.changed().await.is_err() {
        tracing::debug!("Voice catalog closed");
        *updates = None;
        return None;
    }
    Some(rx.borrow_and_update().clone())
}
