//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` types in any signature
//! - Transport failures collapse into [`TransportError`] at the adapter boundary
//! - The speech port is synchronous; completion is signalled back through
//!   a [`NarrationSignal`]

pub mod solver;
pub mod speech;

pub use solver::{HistoryPort, SolvePort, TransportError};
pub use speech::{
    NarrationEnded, NarrationId, NarrationOutcome, NarrationSignal, SpeechError,
    SpeechSynthesizer, UnavailableSynthesizer, Utterance,
};
