//! Handlers for synthesis job submission, status, and listing.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use avatar_core::synthesis::SynthesisRequest;
use avatar_core::types::JobId;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /api/submit` responses.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    fn accepted(job_id: JobId) -> Self {
        Self {
            success: true,
            job_id: Some(job_id),
            error: None,
        }
    }

    fn rejected(error: String) -> Self {
        Self {
            success: false,
            job_id: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobId>,
}

// ---------------------------------------------------------------------------
// Submit
// ---------------------------------------------------------------------------

/// POST /api/submit
///
/// Forward a synthesis request to the vendor. On success the job is cached
/// as `Running` and a detached poll loop starts; the response only carries
/// the job ID. Vendor rejections answer 500 with the vendor's body as
/// `error`.
pub async fn submit_job(
    State(state): State<AppState>,
    payload: Result<Json<SynthesisRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    match state.gateway.submit(&request).await {
        Ok(submission) => {
            state.tracker.record_initial(&submission.job_id).await;
            // Detached: clients learn the outcome through the status endpoint.
            let _ = state.tracker.start_monitoring(&submission.job_id).await;

            Ok((
                StatusCode::OK,
                Json(SubmitResponse::accepted(submission.job_id)),
            ))
        }
        Err(e) => {
            tracing::debug!(error = %e, "Synthesis submission rejected");
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmitResponse::rejected(e.detail())),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// GET /api/status/{job_id}
///
/// Return the job's vendor status document. Terminal jobs are served from
/// the cache; anything else (including IDs never seen before) is refreshed
/// from the vendor first.
pub async fn job_status(
    State(state): State<AppState>,
    Path(job_id): Path<JobId>,
) -> AppResult<Json<Value>> {
    let payload = state.tracker.get_status(&job_id).await?;
    Ok(Json(payload))
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Json<JobListResponse> {
    Json(JobListResponse {
        jobs: state.tracker.list_ids().await,
    })
}
