//! Route definitions for synthesis job submission and status.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::synthesis;
use crate::state::AppState;

/// ```text
/// POST   /submit             -> submit_job
/// GET    /status/{job_id}    -> job_status
/// GET    /jobs               -> list_jobs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(synthesis::submit_job))
        .route("/status/{job_id}", get(synthesis::job_status))
        .route("/jobs", get(synthesis::list_jobs))
}
