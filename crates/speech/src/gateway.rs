//! Submission front door.
//!
//! [`SynthesisGateway`] picks the correlation identifier for a new job and
//! forwards the request to the vendor. It keeps no state of its own; the
//! caller hands successful submissions to the [`JobTracker`].
//!
//! [`JobTracker`]: crate::tracker::JobTracker

use std::sync::Arc;

use avatar_core::synthesis::SynthesisRequest;
use avatar_core::types::JobId;
use serde_json::Value;

use crate::api::SpeechApiError;
use crate::backend::SynthesisBackend;

/// A job the vendor accepted.
#[derive(Debug, Clone)]
pub struct Submission {
    pub job_id: JobId,
    /// The vendor's response to the create call.
    pub initial_response: Value,
}

pub struct SynthesisGateway {
    backend: Arc<dyn SynthesisBackend>,
}

impl SynthesisGateway {
    pub fn new(backend: Arc<dyn SynthesisBackend>) -> Self {
        Self { backend }
    }

    /// Generate a fresh job ID and create the vendor job under it.
    pub async fn submit(&self, request: &SynthesisRequest) -> Result<Submission, SpeechApiError> {
        let job_id = new_job_id();

        let initial_response = self.backend.create_job(&job_id, request).await?;

        tracing::info!(
            job_id = %job_id,
            voice = %request.voice,
            character = %request.character,
            style = %request.style,
            "Synthesis job accepted",
        );

        Ok(Submission {
            job_id,
            initial_response,
        })
    }
}

fn new_job_id() -> JobId {
    uuid::Uuid::new_v4().to_string()
}
