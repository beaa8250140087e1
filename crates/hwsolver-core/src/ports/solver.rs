//! Solver service ports.
//!
//! Both ports are implemented by the HTTP adapter in `hwsolver-client`.
//! Neither port retries; a failed call is reported once.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{HistoryItem, Question, SolveResult};

/// Failure to obtain a well-formed response from the solver service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response (DNS, refused, timeout).
    #[error("Solver service unreachable: {message}")]
    Unreachable { message: String },

    /// The service answered with a non-2xx status.
    #[error("Solver service responded with status {status}: {url}")]
    Status { status: u16, url: String },

    /// The body could not be decoded into the expected shape.
    #[error("Malformed response from solver service: {message}")]
    MalformedBody { message: String },
}

/// Submits questions to the solver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SolvePort: Send + Sync {
    /// Solve a single question.
    async fn solve(&self, question: &Question) -> Result<SolveResult, TransportError>;
}

/// Lists previously answered questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryPort: Send + Sync {
    /// Fetch the listing in service order (most recent first).
    async fn refresh(&self) -> Result<Vec<HistoryItem>, TransportError>;
}
