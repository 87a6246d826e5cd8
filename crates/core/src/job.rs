//! Job status classification and the cached job record.
//!
//! The vendor reports job state as a free-form `status` string inside its
//! JSON response. [`JobStatus::from_payload`] folds that into a small enum so
//! the tracker can decide whether a job still needs polling, while the raw
//! payload is kept verbatim for clients.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::Timestamp;

/// Vendor status string for a job that finished successfully.
pub const STATUS_SUCCEEDED: &str = "Succeeded";

/// Vendor status string for a job the vendor gave up on.
pub const STATUS_FAILED: &str = "Failed";

/// Vendor status string for an accepted job that is still rendering.
pub const STATUS_RUNNING: &str = "Running";

/// Vendor status string for a queued job.
pub const STATUS_NOT_STARTED: &str = "NotStarted";

/// Local status used when a background status query fails. Never sent by
/// the vendor.
pub const STATUS_ERROR: &str = "Error";

/// Last-known state of a synthesis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    /// The background poller could not reach the vendor or was rejected.
    Error,
}

impl JobStatus {
    /// Classify a vendor status string.
    ///
    /// Unrecognised values are treated as [`JobStatus::Running`] so the job
    /// keeps being polled.
    pub fn from_vendor(status: &str) -> Self {
        match status {
            STATUS_SUCCEEDED => Self::Succeeded,
            STATUS_FAILED => Self::Failed,
            STATUS_ERROR => Self::Error,
            STATUS_NOT_STARTED => Self::NotStarted,
            _ => Self::Running,
        }
    }

    /// Classify a vendor response by its top-level `status` field.
    ///
    /// A missing or non-string `status` counts as still running.
    pub fn from_payload(payload: &Value) -> Self {
        payload
            .get("status")
            .and_then(Value::as_str)
            .map_or(Self::Running, Self::from_vendor)
    }

    /// Whether no further polling should happen for a job in this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::Running => STATUS_RUNNING,
            Self::Succeeded => STATUS_SUCCEEDED,
            Self::Failed => STATUS_FAILED,
            Self::Error => STATUS_ERROR,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cached snapshot of one job, as served by the status endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobRecord {
    pub status: JobStatus,
    /// Raw last-known vendor response, or a locally built document for the
    /// initial and error states.
    pub payload: Value,
    pub error: Option<String>,
    pub updated_at: Timestamp,
}

impl JobRecord {
    /// Record written right after a successful submission, before any poll.
    pub fn running(job_id: &str) -> Self {
        Self {
            status: JobStatus::Running,
            payload: json!({ "status": STATUS_RUNNING, "id": job_id }),
            error: None,
            updated_at: chrono::Utc::now(),
        }
    }

    /// Record holding a full vendor status response.
    pub fn from_vendor(payload: Value) -> Self {
        Self {
            status: JobStatus::from_payload(&payload),
            payload,
            error: None,
            updated_at: chrono::Utc::now(),
        }
    }

    /// Terminal record written when a background status query fails.
    pub fn error(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self {
            status: JobStatus::Error,
            payload: json!({ "status": STATUS_ERROR, "error": detail }),
            error: Some(detail),
            updated_at: chrono::Utc::now(),
        }
    }
}
