//! REST client for the batch avatar synthesis endpoints.
//!
//! Wraps `PUT`/`GET {endpoint}/avatar/batchsyntheses/{id}` using
//! [`reqwest`]. Any status below 400 counts as success; everything else is
//! surfaced as [`SpeechApiError::ApiError`] with the raw body.

use async_trait::async_trait;
use avatar_core::synthesis::SynthesisRequest;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::backend::SynthesisBackend;
use crate::config::SpeechConfig;
use crate::payload::CreateSynthesisPayload;

/// HTTP client for the vendor's batch synthesis API.
pub struct SpeechApi {
    client: reqwest::Client,
    config: SpeechConfig,
}

/// Errors from the vendor REST layer.
#[derive(Debug, thiserror::Error)]
pub enum SpeechApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor answered with a status code of 400 or above.
    #[error("Speech API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A status response body was not valid JSON.
    #[error("Invalid speech API response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SpeechApiError {
    /// Client-facing error detail.
    ///
    /// Vendor rejections report the vendor's body verbatim; local failures
    /// report their own message.
    pub fn detail(&self) -> String {
        match self {
            Self::ApiError { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl SpeechApi {
    /// Create a client with the configured per-request timeout.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Create a batch synthesis job named `job_id`.
    ///
    /// The body is returned as JSON when it parses, as a JSON string when it
    /// does not, and as `null` when it is empty.
    pub async fn create_synthesis(
        &self,
        job_id: &str,
        request: &SynthesisRequest,
    ) -> Result<Value, SpeechApiError> {
        let (header, value) = self.config.credential.header();

        let response = self
            .client
            .put(self.config.job_url(job_id))
            .header(CONTENT_TYPE, "application/json")
            .header(header, value)
            .json(&CreateSynthesisPayload::new(request))
            .send()
            .await?;

        let response = match Self::ensure_success(response).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(job_id, error = %e, "Failed to submit batch avatar synthesis job");
                return Err(e);
            }
        };

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        let vendor_id = body.get("id").and_then(Value::as_str).unwrap_or("<none>");
        tracing::info!(job_id, vendor_id, "Batch avatar synthesis job submitted");

        Ok(body)
    }

    /// Fetch the status document of job `job_id`.
    pub async fn get_synthesis(&self, job_id: &str) -> Result<Value, SpeechApiError> {
        let (header, value) = self.config.credential.header();

        let response = self
            .client
            .get(self.config.job_url(job_id))
            .header(header, value)
            .send()
            .await?;

        let response = match Self::ensure_success(response).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(job_id, error = %e, "Failed to get batch synthesis job");
                return Err(e);
            }
        };

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        tracing::debug!(job_id, body = %body, "Fetched batch synthesis job");
        Ok(body)
    }

    // ---- private helpers ----

    /// Return the response unchanged when its status is below 400, or a
    /// [`SpeechApiError::ApiError`] with the status and body text otherwise.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SpeechApiError> {
        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SpeechApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SynthesisBackend for SpeechApi {
    async fn create_job(
        &self,
        job_id: &str,
        request: &SynthesisRequest,
    ) -> Result<Value, SpeechApiError> {
        self.create_synthesis(job_id, request).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Value, SpeechApiError> {
        self.get_synthesis(job_id).await
    }
}
