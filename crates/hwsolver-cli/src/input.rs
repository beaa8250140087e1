//! Line editor on a dedicated thread.
//!
//! `rustyline` blocks, so it runs off the runtime. Each line is handed to
//! the session with an acknowledgement channel; the prompt is redrawn only
//! after the session has finished printing its response.

use anyhow::Result;
use rustyline::error::ReadlineError;
use tokio::sync::{mpsc, oneshot};

/// A line typed by the user.
pub struct InputLine {
    pub text: String,
    /// Completed once the line has been handled.
    pub ack: oneshot::Sender<()>,
}

/// Start reading lines with `prompt`.
///
/// The channel closes on end of input (Ctrl-D) or when the session stops
/// listening.
pub fn spawn_prompt(prompt: &'static str) -> Result<mpsc::Receiver<InputLine>> {
    let mut editor = rustyline::DefaultEditor::new()?;
    let (tx, rx) = mpsc::channel(1);

    std::thread::Builder::new()
        .name("hwsolver-prompt".to_string())
        .spawn(move || {
            loop {
                match editor.readline(prompt) {
                    Ok(text) => {
                        if !text.trim().is_empty() {
                            let _ = editor.add_history_entry(text.as_str());
                        }
                        let (ack, handled) = oneshot::channel();
                        if tx.blocking_send(InputLine { text, ack }).is_err() {
                            break;
                        }
                        if handled.blocking_recv().is_err() {
                            break;
                        }
                    }
                    // Ctrl-C discards the line being typed.
                    Err(ReadlineError::Interrupted) => {}
                    Err(ReadlineError::Eof) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Line editor failed");
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}
