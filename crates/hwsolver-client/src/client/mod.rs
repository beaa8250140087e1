//! Solver service client.

use crate::config::SolverClientConfig;
use crate::error::ClientResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{HistoryResponse, SolveRequest, SolveResponse};
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Solver client using the reqwest HTTP backend.
pub type DefaultSolverClient = SolverClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the solver service's `/solve` and `/history` endpoints.
///
/// Generic over the HTTP backend for testing. Use [`DefaultSolverClient`]
/// in production and talk to it through the core ports.
pub struct SolverClient<B: HttpBackend> {
    pub(crate) backend: B,
    solve_url: Url,
    history_url: Url,
}

impl DefaultSolverClient {
    /// Create a client for the configured service.
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(config: &SolverClientConfig) -> ClientResult<Self> {
        let backend = ReqwestBackend::new(config)?;
        let client = SolverClient::with_backend(&config.base_url, backend)?;
        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Solver client ready");
        Ok(client)
    }
}

impl<B: HttpBackend> SolverClient<B> {
    /// Create a client over a specific backend.
    pub(crate) fn with_backend(base_url: &str, backend: B) -> ClientResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        Ok(Self {
            backend,
            solve_url: Url::parse(&format!("{base}/solve"))?,
            history_url: Url::parse(&format!("{base}/history"))?,
        })
    }

    pub fn solve_url(&self) -> &Url {
        &self.solve_url
    }

    pub fn history_url(&self) -> &Url {
        &self.history_url
    }

    /// `POST /solve`.
    pub(crate) async fn post_question(&self, question: &str) -> ClientResult<SolveResponse> {
        tracing::debug!(url = %self.solve_url, "Submitting question");
        self.backend
            .post_json(&self.solve_url, &SolveRequest { question })
            .await
    }

    /// `GET /history`.
    pub(crate) async fn fetch_history(&self) -> ClientResult<HistoryResponse> {
        tracing::debug!(url = %self.history_url, "Fetching history");
        self.backend.get_json(&self.history_url).await
    }
}
