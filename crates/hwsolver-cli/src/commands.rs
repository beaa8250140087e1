//! Interactive session commands.

use hwsolver_core::SamplePrompt;
use thiserror::Error;

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Submit the draft, replacing it first if text is given.
    Ask(Option<String>),
    /// Replace the draft without submitting.
    Draft(String),
    Sample(SamplePrompt),
    Speak,
    Stop,
    AutoSpeak(bool),
    Voice(usize),
    Voices,
    History,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown sample '{0}' (try: science, math)")]
    UnknownSample(String),
}

pub const HELP: &str = "\
Commands:
  ask [question]       submit the draft, or the given question
  draft <question>     replace the draft without submitting
  sample science|math  load a sample prompt into the draft
  speak                narrate the displayed result
  stop                 stop narrating
  auto on|off          narrate every new result
  voices               list narration voices
  voice <n>            pick a narration voice
  history              show past questions
  show                 show the draft and current result
  help                 show this help
  quit                 leave
Anything else is asked as a question.";

/// Parse a line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<ReplCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(w, r)| (w, r.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "ask" => ReplCommand::Ask((!rest.is_empty()).then(|| rest.to_string())),
        "draft" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("draft <question>"));
            }
            ReplCommand::Draft(rest.to_string())
        }
        "sample" => {
            let prompt = SamplePrompt::from_label(rest)
                .ok_or_else(|| CommandError::UnknownSample(rest.to_string()))?;
            ReplCommand::Sample(prompt)
        }
        "speak" => ReplCommand::Speak,
        "stop" => ReplCommand::Stop,
        "auto" => match rest {
            "on" => ReplCommand::AutoSpeak(true),
            "off" => ReplCommand::AutoSpeak(false),
            _ => return Err(CommandError::Usage("auto on|off")),
        },
        "voice" => {
            let index = rest
                .parse()
                .map_err(|_| CommandError::Usage("voice <n>"))?;
            ReplCommand::Voice(index)
        }
        "voices" => ReplCommand::Voices,
        "history" => ReplCommand::History,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Ask(Some(line.to_string())),
    };

    Ok(Some(command))
}
