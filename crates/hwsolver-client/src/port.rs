//! Core port implementations for `SolverClient`.

use async_trait::async_trait;
use hwsolver_core::{HistoryItem, HistoryPort, Question, SolvePort, SolveResult, TransportError};

use crate::client::SolverClient;
use crate::error::ClientError;
use crate::http::HttpBackend;
use crate::parsing::{to_history_items, to_solve_result};

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `ClientError` to the core `TransportError`.
fn map_error(err: ClientError) -> TransportError {
    match err {
        ClientError::RequestFailed { status, url } => TransportError::Status { status, url },
        ClientError::Network(e) if e.is_decode() => TransportError::MalformedBody {
            message: e.to_string(),
        },
        ClientError::Network(e) => TransportError::Unreachable {
            message: e.to_string(),
        },
        ClientError::InvalidUrl(e) => TransportError::Unreachable {
            message: e.to_string(),
        },
        ClientError::JsonParse(e) => TransportError::MalformedBody {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> SolvePort for SolverClient<B> {
    async fn solve(&self, question: &Question) -> Result<SolveResult, TransportError> {
        let response = self
            .post_question(question.as_str())
            .await
            .map_err(map_error)?;
        Ok(to_solve_result(response))
    }
}

#[async_trait]
impl<B: HttpBackend + Send + Sync> HistoryPort for SolverClient<B> {
    async fn refresh(&self) -> Result<Vec<HistoryItem>, TransportError> {
        let response = self.fetch_history().await.map_err(map_error)?;
        let items = to_history_items(response);
        tracing::debug!(count = items.len(), "History listing received");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    fn client(backend: FakeBackend) -> SolverClient<FakeBackend> {
        SolverClient::with_backend("http://localhost:8000", backend).unwrap()
    }

    fn question(text: &str) -> Question {
        Question::new(text).unwrap()
    }

    #[tokio::test]
    async fn test_solve_returns_result() {
        let client = client(FakeBackend::new().with_response(
            "/solve",
            CannedResponse::Json(json!({
                "answer": "x = 4",
                "explanation": "Subtract 6, divide by 2"
            })),
        ));

        let result = client.solve(&question("Solve: 2x + 6 = 14")).await.unwrap();
        assert_eq!(
            result,
            SolveResult::answer("x = 4").with_explanation("Subtract 6, divide by 2")
        );
    }

    #[tokio::test]
    async fn test_solve_sends_question_untrimmed() {
        let client = client(
            FakeBackend::new()
                .with_response("/solve", CannedResponse::Json(json!({"answer": "42"}))),
        );

        client.solve(&question("  6 * 7 ")).await.unwrap();
        assert_eq!(
            client.backend.requests()[0].body,
            Some(json!({"question": "  6 * 7 "}))
        );
    }

    #[tokio::test]
    async fn test_solve_non_2xx_is_status_error() {
        let client =
            client(FakeBackend::new().with_response("/solve", CannedResponse::Status(500)));

        let err = client.solve(&question("What is 6 * 7?")).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                url: "http://localhost:8000/solve".to_string(),
            }
        );
        // No retry.
        assert_eq!(client.backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_solve_malformed_body() {
        let client = client(
            FakeBackend::new()
                .with_response("/solve", CannedResponse::Garbage("<html>oops</html>".into())),
        );

        let err = client.solve(&question("What is 6 * 7?")).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedBody { .. }));
    }

    #[tokio::test]
    async fn test_solve_missing_answer_is_malformed() {
        let client = client(
            FakeBackend::new()
                .with_response("/solve", CannedResponse::Json(json!({"sources": []}))),
        );

        let err = client.solve(&question("What is 6 * 7?")).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedBody { .. }));
    }

    #[tokio::test]
    async fn test_refresh_returns_items_in_order() {
        let client = client(FakeBackend::new().with_response(
            "/history",
            CannedResponse::Json(json!({
                "items": [
                    {"_id": "b", "question": "q2", "answer": "a2"},
                    {"_id": "a", "question": "q1", "answer": "a1"}
                ]
            })),
        ));

        let items = client.refresh().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_refresh_empty_and_missing_items() {
        let client = client(
            FakeBackend::new().with_response("/history", CannedResponse::Json(json!({"items": []}))),
        );
        assert!(client.refresh().await.unwrap().is_empty());

        let client = client_without_items();
        assert!(client.refresh().await.unwrap().is_empty());
    }

    fn client_without_items() -> SolverClient<FakeBackend> {
        client(FakeBackend::new().with_response("/history", CannedResponse::Json(json!({}))))
    }

    #[tokio::test]
    async fn test_refresh_status_error() {
        let client =
            client(FakeBackend::new().with_response("/history", CannedResponse::Status(503)));
        let err = client.refresh().await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Port 9 (discard) on loopback refuses connections on test hosts.
        let config = crate::SolverClientConfig::new("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let client = crate::DefaultSolverClient::new(&config).unwrap();

        let err = client.solve(&question("What is 6 * 7?")).await.unwrap_err();
        assert!(matches!(err, TransportError::Unreachable { .. }));
    }
}
