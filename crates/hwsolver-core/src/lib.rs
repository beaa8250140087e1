#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod controller;
pub mod domain;
pub mod events;
pub mod ports;
pub mod speech;
pub mod voices;

// Re-export commonly used types for convenience
pub use config::{
    ConfigError, ControllerConfig, DEFAULT_ORIGIN, DEFAULT_VOICE_LOCALE, resolve_backend_base,
};
pub use controller::{InteractionController, InteractionDeps, InteractionState, RequestId, RequestPhase};
pub use domain::{
    FAILURE_ANSWER, HistoryItem, InvalidInput, Question, SamplePrompt, SolveResult,
    VoiceDescriptor,
};
pub use events::{InteractionEvent, ResultOutcome};
pub use ports::{
    HistoryPort, NarrationEnded, NarrationId, NarrationOutcome, NarrationSignal, SolvePort,
    SpeechError, SpeechSynthesizer, TransportError, UnavailableSynthesizer, Utterance,
};
pub use speech::{SpeechController, SpeechPhase};
pub use voices::VoiceRegistry;

// Silence unused dev-dependency warnings
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tokio_test as _;
