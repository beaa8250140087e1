//! HTTP backend abstraction for the solver service.
//!
//! The client is generic over [`HttpBackend`] so tests can inject canned
//! responses. The production backend is a thin reqwest wrapper with a
//! request timeout and no retries.

use crate::config::SolverClientConfig;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Fetches and posts JSON.
///
/// Implementations report a non-2xx status as [`ClientError::RequestFailed`]
/// and an undecodable body as [`ClientError::JsonParse`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// `GET` a URL and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ClientResult<T>;

    /// `POST` a JSON body to a URL and deserialize the JSON response.
    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(config: &SolverClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    /// Check the status and decode the body.
    async fn read_json<T: DeserializeOwned>(
        url: &Url,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::RequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Decode separately so a bad body is a parse error, not a network one.
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ClientResult<T> {
        let response = self.client.get(url.as_str()).send().await?;
        Self::read_json(url, response).await
    }

    async fn post_json<B, T>(&self, url: &Url, body: &B) -> ClientResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let response = self.client.post(url.as_str()).json(body).send().await?;
        Self::read_json(url, response).await
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned response for the fake backend.
    #[derive(Clone)]
    pub enum CannedResponse {
        /// 2xx with this JSON body
        Json(serde_json::Value),
        /// 2xx with a body that is not JSON
        Garbage(String),
        /// Non-2xx status
        Status(u16),
    }

    /// A request seen by the fake backend.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub body: Option<serde_json::Value>,
    }

    /// A fake HTTP backend that returns canned responses by URL substring.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned response for URLs containing `url_contains`.
        pub fn with_response(mut self, url_contains: &str, response: CannedResponse) -> Self {
            self.responses.push((url_contains.to_string(), response));
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn respond<T: DeserializeOwned>(&self, url: &Url) -> ClientResult<T> {
            let canned = self
                .responses
                .iter()
                .find(|(pattern, _)| url.as_str().contains(pattern.as_str()))
                .map(|(_, response)| response.clone())
                .unwrap_or(CannedResponse::Status(404));

            match canned {
                CannedResponse::Json(json) => Ok(serde_json::from_value(json)?),
                CannedResponse::Garbage(body) => Ok(serde_json::from_str(&body)?),
                CannedResponse::Status(status) => Err(ClientError::RequestFailed {
                    status,
                    url: url.to_string(),
                }),
            }
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> ClientResult<T> {
            self.requests.lock().unwrap().push(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                body: None,
            });
            self.respond(url)
        }

        async fn post_json<B, T>(&self, url: &Url, body: &B) -> ClientResult<T>
        where
            B: Serialize + Sync,
            T: DeserializeOwned + Send,
        {
            self.requests.lock().unwrap().push(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                body: Some(serde_json::to_value(body)?),
            });
            self.respond(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = SolverClientConfig::default();
        assert!(ReqwestBackend::new(&config).is_ok());
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[tokio::test]
        async fn test_fake_backend_returns_canned_response() {
            let backend = FakeBackend::new()
                .with_response("/history", CannedResponse::Json(json!({"items": []})));

            let url = Url::parse("http://localhost:8000/history").unwrap();
            let result: serde_json::Value = backend.get_json(&url).await.unwrap();

            assert_eq!(result["items"], json!([]));
            assert_eq!(backend.requests()[0].method, "GET");
        }

        #[tokio::test]
        async fn test_fake_backend_returns_404_for_unknown_url() {
            let backend = FakeBackend::new();
            let url = Url::parse("http://localhost:8000/unknown").unwrap();

            let result: ClientResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(
                result,
                Err(ClientError::RequestFailed { status: 404, .. })
            ));
        }

        #[tokio::test]
        async fn test_fake_backend_records_post_body() {
            let backend = FakeBackend::new()
                .with_response("/solve", CannedResponse::Json(json!({"answer": "42"})));
            let url = Url::parse("http://localhost:8000/solve").unwrap();

            let _: serde_json::Value = backend
                .post_json(&url, &json!({"question": "6 * 7"}))
                .await
                .unwrap();

            let requests = backend.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].method, "POST");
            assert_eq!(requests[0].body, Some(json!({"question": "6 * 7"})));
        }

        #[tokio::test]
        async fn test_fake_backend_garbage_body_is_parse_error() {
            let backend = FakeBackend::new()
                .with_response("/solve", CannedResponse::Garbage("<html>".to_string()));
            let url = Url::parse("http://localhost:8000/solve").unwrap();

            let result: ClientResult<serde_json::Value> =
                backend.post_json(&url, &json!({})).await;
            assert!(matches!(result, Err(ClientError::JsonParse(_))));
        }
    }
}
