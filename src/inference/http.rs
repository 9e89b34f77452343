//! HTTP inference backend.
//!
//! Forwards inputs as JSON to an upstream model server and expects a
//! [`Payload`] back in the response body.

use async_trait::async_trait;
use tracing::debug;

use super::InferenceBackend;
use crate::error::InferenceError;
use crate::payload::Payload;

/// Backend that POSTs `{"input": <payload>}` to a model server.
#[derive(Debug, Clone)]
pub struct HttpInferenceBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpInferenceBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn infer(&self, input: &Payload) -> Result<Payload, InferenceError> {
        debug!(url = %self.url, kind = input.kind(), "Forwarding inference request");

        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "input": input }))
            .send()
            .await
            .map_err(|e| InferenceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::Backend(format!(
                "upstream returned {status}: {body}"
            )));
        }

        response
            .json::<Payload>()
            .await
            .map_err(|e| InferenceError::Backend(format!("malformed upstream response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_keeps_url() {
        let backend = HttpInferenceBackend::new("http://127.0.0.1:9/infer");
        assert_eq!(backend.url(), "http://127.0.0.1:9/infer");
        assert_eq!(backend.name(), "http");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Port 9 (discard) is closed on loopback in test environments
        let backend = HttpInferenceBackend::new("http://127.0.0.1:9/infer");
        let result = backend.infer(&Payload::vector(vec![1.0])).await;
        assert!(matches!(result, Err(InferenceError::Transport(_))));
    }
}
