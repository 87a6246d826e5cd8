//! Abstraction over the vendor's batch-synthesis endpoints.
//!
//! The gateway and tracker only talk to the vendor through this trait so
//! tests can substitute a counting stub for the real HTTP client.

use async_trait::async_trait;
use avatar_core::synthesis::SynthesisRequest;
use serde_json::Value;

use crate::api::SpeechApiError;

#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Create a synthesis job under the caller-chosen `job_id`.
    ///
    /// Returns the vendor's response body. Any body shape is accepted as
    /// long as the vendor did not reject the call.
    async fn create_job(
        &self,
        job_id: &str,
        request: &SynthesisRequest,
    ) -> Result<Value, SpeechApiError>;

    /// Fetch the vendor's full status document for `job_id`.
    async fn get_job(&self, job_id: &str) -> Result<Value, SpeechApiError>;
}
