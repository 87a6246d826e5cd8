pub mod health;
pub mod synthesis;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /health            health check
/// POST /submit            submit a synthesis job
/// GET  /status/{job_id}   job status (cached or refreshed)
/// GET  /jobs              list known job IDs
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(synthesis::router())
}
