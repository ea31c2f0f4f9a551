use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::SubmissionForm;

/// Acknowledgement returned by the sink on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkAck {
    pub message: Option<String>,
}

/// Sink-side failures. All are recoverable by resubmitting; nothing retries
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("could not reach the assessment backend")]
    Transport(#[source] reqwest::Error),
    #[error("assessment backend responded with status {0}")]
    Status(u16),
    #[error("assessment backend rejected the submission: {0}")]
    Rejected(String),
    #[error("failed to construct the http client")]
    Client(#[source] reqwest::Error),
}

/// Outbound boundary for completed assessments. The production
/// implementation POSTs to the remote backend; tests substitute a recording
/// mock.
pub trait SubmissionSink: Send + Sync {
    fn submit(
        &self,
        form: &SubmissionForm,
    ) -> impl std::future::Future<Output = Result<SinkAck, SubmissionError>> + Send;
}

/// HTTP sink posting the form as JSON to a fixed endpoint. Every request
/// runs under a bounded timeout; there is no cancellation once a request is
/// issued.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmissionError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SubmissionError::Client)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SubmissionSink for HttpSink {
    async fn submit(&self, form: &SubmissionForm) -> Result<SinkAck, SubmissionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(form)
            .send()
            .await
            .map_err(SubmissionError::Transport)?;

        let status = response.status();
        debug!(%status, endpoint = %self.endpoint, "submission response received");

        if !status.is_success() {
            return Err(SubmissionError::Status(status.as_u16()));
        }

        // A 2xx body may still carry an application-level error field.
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        if let Some(error) = body.get("error").and_then(|value| value.as_str()) {
            return Err(SubmissionError::Rejected(error.to_string()));
        }

        Ok(SinkAck {
            message: body
                .get("message")
                .and_then(|value| value.as_str())
                .map(str::to_string),
        })
    }
}
