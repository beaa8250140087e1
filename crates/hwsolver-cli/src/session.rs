//! Interactive session: turns commands into controller calls and renders
//! controller events.

use std::io::Write;

use anyhow::Result;
use chrono::Utc;
use hwsolver_core::{
    InteractionController, InteractionEvent, RequestPhase, ResultOutcome, VoiceDescriptor,
};
use tokio::sync::{mpsc, watch};

use crate::bootstrap::CliContext;
use crate::commands::{self, HELP, ReplCommand};
use crate::input::InputLine;
use crate::presentation::{format_history, format_result, format_voices};

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    controller: InteractionController,
    events: mpsc::UnboundedReceiver<InteractionEvent>,
    _voices: watch::Sender<Vec<VoiceDescriptor>>,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(ctx: CliContext, out: W) -> Self {
        Self {
            controller: ctx.controller,
            events: ctx.events,
            _voices: ctx.voices,
            out,
        }
    }

    pub const fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Load the initial history listing.
    pub async fn start(&mut self) -> Result<()> {
        self.controller.load_history();
        self.controller.settle().await;
        self.render_events()
    }

    /// Ask a single question and wait for the answer.
    pub async fn ask_once(&mut self, question: &str) -> Result<()> {
        self.handle_command(ReplCommand::Ask(Some(question.to_string())))
            .await?;
        self.controller.settle().await;
        // Let a narration triggered by --auto-speak play out.
        while self.controller.speech_phase().is_speaking() {
            self.controller.process_next().await;
        }
        self.render_events()
    }

    /// Serve input lines until the user quits or input ends.
    pub async fn run(&mut self, mut lines: mpsc::Receiver<InputLine>) -> Result<()> {
        writeln!(self.out, "Draft: {}", self.controller.question())?;
        writeln!(self.out, "Type a question, or `help`.")?;
        self.out.flush()?;

        loop {
            tokio::select! {
                line = lines.recv() => {
                    let Some(InputLine { text, ack }) = line else {
                        break;
                    };
                    let flow = self.handle_line(&text).await?;
                    let _ = ack.send(());
                    if flow == Flow::Quit {
                        break;
                    }
                }
                () = self.controller.process_next() => {
                    self.render_events()?;
                }
            }
        }

        self.controller.stop_speech();
        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        match commands::parse(line) {
            Ok(Some(command)) => self.handle_command(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                self.out.flush()?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn handle_command(&mut self, command: ReplCommand) -> Result<Flow> {
        match command {
            ReplCommand::Ask(text) => {
                if let Some(text) = text {
                    self.controller.set_question(text);
                }
                if self.controller.submit_current().is_none() {
                    writeln!(self.out, "Nothing to ask.")?;
                }
                // Show the answer as soon as it lands; the history refresh
                // it triggers is applied later by the event loop.
                while self.controller.phase().is_loading() {
                    self.controller.process_next().await;
                    self.render_events()?;
                }
            }
            ReplCommand::Draft(text) => {
                self.controller.set_question(text);
            }
            ReplCommand::Sample(prompt) => {
                self.controller.set_question(prompt.text());
                writeln!(self.out, "Draft: {}", prompt.text())?;
            }
            ReplCommand::Speak => {
                if self.controller.speak_result().is_none() {
                    writeln!(self.out, "Nothing to speak.")?;
                }
            }
            ReplCommand::Stop => self.controller.stop_speech(),
            ReplCommand::AutoSpeak(enabled) => {
                self.controller.set_auto_speak(enabled);
                let state = if enabled { "on" } else { "off" };
                writeln!(self.out, "Auto-speak {state}.")?;
            }
            ReplCommand::Voice(index) => {
                if !self.controller.set_voice(index) {
                    writeln!(self.out, "No voice {index}; using the default voice.")?;
                }
                if let Some(voice) = self.controller.voices().current() {
                    writeln!(self.out, "Voice: {}", voice.label())?;
                }
            }
            ReplCommand::Voices => {
                let voices = self.controller.voices();
                let listing = format_voices(&voices.labels(), voices.selected_index());
                write!(self.out, "{listing}")?;
            }
            ReplCommand::History => {
                self.controller.load_history();
                self.controller.settle().await;
                let listing = format_history(self.controller.history(), Utc::now());
                write!(self.out, "{listing}")?;
            }
            ReplCommand::Show => self.show()?,
            ReplCommand::Help => writeln!(self.out, "{HELP}")?,
            ReplCommand::Quit => return Ok(Flow::Quit),
        }

        self.render_events()?;
        Ok(Flow::Continue)
    }

    fn show(&mut self) -> Result<()> {
        writeln!(self.out, "Draft: {}", self.controller.question())?;
        writeln!(self.out, "Status: {}", self.controller.phase().label())?;
        if let Some(result) = self.controller.result() {
            let outcome = if matches!(self.controller.phase(), RequestPhase::Failed(_)) {
                ResultOutcome::Failed
            } else {
                ResultOutcome::Succeeded
            };
            write!(self.out, "{}", format_result(result, outcome))?;
        }
        Ok(())
    }

    /// Print whatever the controller reported since the last call.
    fn render_events(&mut self) -> Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                InteractionEvent::Loading { .. } => writeln!(self.out, "Solving...")?,
                InteractionEvent::ResultChanged {
                    outcome, result, ..
                } => write!(self.out, "{}", format_result(&result, outcome))?,
                InteractionEvent::SpeechStarted { text, .. } => {
                    writeln!(self.out, "(speaking) {text}")?;
                }
                InteractionEvent::HistoryUpdated { items } => {
                    tracing::debug!(count = items.len(), "History updated");
                }
                InteractionEvent::SpeechStopped { .. } | InteractionEvent::VoicesChanged { .. } => {}
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use hwsolver_core::{
        ControllerConfig, HistoryItem, HistoryPort, InteractionDeps, Question, SolvePort,
        SolveResult, SpeechPhase, TransportError,
    };

    use crate::console_speech::{ConsoleSynthesizer, console_voices};

    /// Solver service double: answers every question the same way.
    struct FakeService {
        answer: Result<SolveResult, TransportError>,
        history: Vec<HistoryItem>,
        questions: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SolvePort for FakeService {
        async fn solve(&self, question: &Question) -> Result<SolveResult, TransportError> {
            self.questions.lock().unwrap().push(question.to_string());
            self.answer.clone()
        }
    }

    #[async_trait]
    impl HistoryPort for FakeService {
        async fn refresh(&self) -> Result<Vec<HistoryItem>, TransportError> {
            Ok(self.history.clone())
        }
    }

    /// History port whose listing never arrives.
    struct StalledHistory;

    #[async_trait]
    impl HistoryPort for StalledHistory {
        async fn refresh(&self) -> Result<Vec<HistoryItem>, TransportError> {
            std::future::pending().await
        }
    }

    fn session(
        answer: Result<SolveResult, TransportError>,
        history: Vec<HistoryItem>,
    ) -> (Session<Vec<u8>>, Arc<FakeService>) {
        let service = Arc::new(FakeService {
            answer,
            history,
            questions: Mutex::new(Vec::new()),
        });
        let session = session_with(service.clone(), service.clone());
        (session, service)
    }

    fn session_with(
        solver: Arc<dyn SolvePort>,
        history: Arc<dyn HistoryPort>,
    ) -> Session<Vec<u8>> {
        let (voices, voices_rx) = watch::channel(console_voices());
        let deps = InteractionDeps {
            solver,
            history,
            // Fast enough to finish inside a test.
            synthesizer: Arc::new(ConsoleSynthesizer::new(600)),
            voices: voices_rx,
        };
        let (controller, events) =
            InteractionController::new(deps, &ControllerConfig::default()).unwrap();
        let ctx = CliContext {
            controller,
            events,
            voices,
            backend_base: "http://localhost:8000".to_string(),
        };
        Session::new(ctx, Vec::new())
    }

    fn output(session: Session<Vec<u8>>) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_ask_renders_answer() {
        let answer = SolveResult::answer("x = 4").with_explanation("Subtract 6, divide by 2");
        let (mut session, service) = session(Ok(answer), Vec::new());

        let flow = session.handle_line("ask").await.unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            *service.questions.lock().unwrap(),
            vec!["Solve: 2x + 6 = 14".to_string()]
        );

        let text = output(session);
        assert_eq!(
            text,
            "Solving...\nAnswer: x = 4\nExplanation: Subtract 6, divide by 2\n"
        );
    }

    #[tokio::test]
    async fn test_free_text_replaces_draft() {
        let (mut session, service) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("What is 6 * 7?").await.unwrap();
        assert_eq!(session.controller().question(), "What is 6 * 7?");
        assert_eq!(
            *service.questions.lock().unwrap(),
            vec!["What is 6 * 7?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_blank_draft_is_not_sent() {
        let (mut session, service) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("draft    ").await.unwrap();
        session.controller.set_question("   ");
        session.handle_line("ask").await.unwrap();

        assert!(service.questions.lock().unwrap().is_empty());
        assert!(output(session).contains("Nothing to ask."));
    }

    #[tokio::test]
    async fn test_failure_is_rendered() {
        let (mut session, _) = session(
            Err(TransportError::Unreachable {
                message: "connection refused".to_string(),
            }),
            Vec::new(),
        );

        session.handle_line("ask").await.unwrap();
        let text = output(session);
        assert!(text.contains("Error: Error contacting solver\n"));
        assert!(text.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_answer_shown_while_history_is_outstanding() {
        let service = Arc::new(FakeService {
            answer: Ok(SolveResult::answer("x = 4")),
            history: Vec::new(),
            questions: Mutex::new(Vec::new()),
        });
        let mut session = session_with(service, Arc::new(StalledHistory));

        let flow = tokio::time::timeout(Duration::from_secs(2), session.handle_line("ask"))
            .await
            .expect("answer display waited on the history refresh")
            .unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(session.controller().is_busy());
        assert_eq!(output(session), "Solving...\nAnswer: x = 4\n");
    }

    #[tokio::test]
    async fn test_sample_sets_draft_only() {
        let (mut session, service) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("sample math").await.unwrap();
        assert_eq!(session.controller().question(), "Evaluate (2^3 + 4) * 5");
        assert!(service.questions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_listing() {
        let (mut session, _) = session(
            Ok(SolveResult::answer("42")),
            vec![HistoryItem::new("1", "What is 6 * 7?", "42")],
        );

        session.start().await.unwrap();
        session.handle_line("history").await.unwrap();
        let text = output(session);
        assert!(text.contains("  Q: What is 6 * 7?\n  A: 42\n"));
    }

    #[tokio::test]
    async fn test_empty_history_listing() {
        let (mut session, _) = session(Ok(SolveResult::answer("42")), Vec::new());
        session.handle_line("history").await.unwrap();
        assert!(output(session).contains("No history yet."));
    }

    #[tokio::test]
    async fn test_auto_speak_narrates_then_finishes() {
        let (mut session, _) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("auto on").await.unwrap();
        session.handle_line("ask").await.unwrap();
        assert_eq!(session.controller().speech_phase(), SpeechPhase::Speaking);

        // One word at 600 wpm is 100 ms.
        tokio::time::timeout(Duration::from_secs(2), async {
            while session.controller.speech_phase().is_speaking() {
                session.controller.process_next().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(session.controller().speech_phase(), SpeechPhase::Idle);
        assert!(output(session).contains("(speaking) 42.\n"));
    }

    #[tokio::test]
    async fn test_speak_and_stop() {
        let (mut session, _) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("speak").await.unwrap();
        session.handle_line("ask").await.unwrap();
        session.handle_line("speak").await.unwrap();
        assert!(session.controller().speech_phase().is_speaking());

        session.handle_line("stop").await.unwrap();
        assert_eq!(session.controller().speech_phase(), SpeechPhase::Idle);
        assert!(output(session).starts_with("Nothing to speak.\n"));
    }

    #[tokio::test]
    async fn test_voice_selection() {
        let (mut session, _) = session(Ok(SolveResult::answer("42")), Vec::new());

        session.handle_line("voice 1").await.unwrap();
        session.handle_line("voices").await.unwrap();
        session.handle_line("voice 9").await.unwrap();

        let text = output(session);
        assert!(text.contains("Voice: Daniel (en-GB)\n"));
        assert!(text.contains("* 1: Daniel (en-GB)\n"));
        assert!(text.contains("No voice 9; using the default voice.\nVoice: Alex (en-US)\n"));
    }

    #[tokio::test]
    async fn test_quit_and_bad_command() {
        let (mut session, _) = session(Ok(SolveResult::answer("42")), Vec::new());

        assert_eq!(
            session.handle_line("auto sometimes").await.unwrap(),
            Flow::Continue
        );
        assert_eq!(session.handle_line("quit").await.unwrap(), Flow::Quit);
        assert!(output(session).contains("Usage: auto on|off"));
    }

    #[tokio::test]
    async fn test_run_until_input_closes() {
        let (mut session, service) = session(Ok(SolveResult::answer("42")), Vec::new());
        let (tx, rx) = mpsc::channel(1);

        let feeder = async move {
            let (ack, handled) = tokio::sync::oneshot::channel();
            tx.send(InputLine {
                text: "What is 6 * 7?".to_string(),
                ack,
            })
            .await
            .unwrap();
            handled.await.unwrap();
            // Dropping the sender ends the session.
        };

        let (result, ()) = tokio::join!(session.run(rx), feeder);
        result.unwrap();

        assert_eq!(service.questions.lock().unwrap().len(), 1);
        assert!(output(session).contains("Answer: 42\n"));
    }
}
