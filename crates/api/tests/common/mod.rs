//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use avatar_api::config::{ServerConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
use avatar_api::router::build_app_router;
use avatar_api::state::AppState;
use avatar_core::synthesis::SynthesisRequest;
use avatar_speech::api::SpeechApiError;
use avatar_speech::backend::SynthesisBackend;
use avatar_speech::config::{SpeechConfig, SpeechCredential};
use avatar_speech::tracker::JobTracker;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Stub vendor
// ---------------------------------------------------------------------------

/// Scripted outcome of one vendor status query.
pub enum StatusReply {
    Ok(Value),
    Rejected(u16, &'static str),
}

/// In-memory vendor that counts calls and replays scripted status replies.
///
/// Once the script is exhausted every status query answers `fallback`.
pub struct StubBackend {
    create_rejection: Option<(u16, String)>,
    script: Mutex<VecDeque<StatusReply>>,
    fallback: Value,
    pub create_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub created_ids: Mutex<Vec<String>>,
    pub created_requests: Mutex<Vec<SynthesisRequest>>,
}

impl StubBackend {
    /// Accepts every job and reports `Running` forever.
    pub fn running() -> Self {
        Self {
            create_rejection: None,
            script: Mutex::new(VecDeque::new()),
            fallback: json!({ "status": "Running" }),
            create_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            created_ids: Mutex::new(Vec::new()),
            created_requests: Mutex::new(Vec::new()),
        }
    }

    /// Rejects every create call with `status` and `body`.
    pub fn rejecting(status: u16, body: &str) -> Self {
        Self {
            create_rejection: Some((status, body.to_string())),
            ..Self::running()
        }
    }

    /// Replays `replies` in order, then `Running` forever.
    pub fn scripted(replies: Vec<StatusReply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::running()
        }
    }

    pub fn create_count(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn status_count(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SynthesisBackend for StubBackend {
    async fn create_job(
        &self,
        job_id: &str,
        request: &SynthesisRequest,
    ) -> Result<Value, SpeechApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((status, body)) = &self.create_rejection {
            return Err(SpeechApiError::ApiError {
                status: *status,
                body: body.clone(),
            });
        }
        self.created_ids.lock().unwrap().push(job_id.to_string());
        self.created_requests.lock().unwrap().push(request.clone());
        Ok(json!({ "id": job_id, "status": "NotStarted" }))
    }

    async fn get_job(&self, job_id: &str) -> Result<Value, SpeechApiError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(StatusReply::Ok(mut value)) => {
                value["id"] = json!(job_id);
                Ok(value)
            }
            Some(StatusReply::Rejected(status, body)) => Err(SpeechApiError::ApiError {
                status,
                body: body.to_string(),
            }),
            None => {
                let mut value = self.fallback.clone();
                value["id"] = json!(job_id);
                Ok(value)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
///
/// The vendor endpoint is never contacted; a stub backend stands in.
pub fn test_config(poll_interval: Duration) -> ServerConfig {
    let mut speech = SpeechConfig::new(
        "http://vendor.invalid",
        SpeechCredential::SubscriptionKey("test-key".into()),
    );
    speech.poll_interval = poll_interval;

    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        speech,
    }
}

/// Build the full app around a stub vendor, returning the router and a
/// handle to its tracker.
pub fn build_test_app(
    backend: Arc<StubBackend>,
    poll_interval: Duration,
) -> (Router, Arc<JobTracker>) {
    build_app_with(test_config(poll_interval), backend)
}

/// Build the full app from an explicit config and any vendor backend.
pub fn build_app_with(
    config: ServerConfig,
    backend: Arc<dyn SynthesisBackend>,
) -> (Router, Arc<JobTracker>) {
    let state = AppState::new(config.clone(), backend);
    let tracker = Arc::clone(&state.tracker);
    (build_app_router(state, &config), tracker)
}

/// Wait until no poll loop is running.
pub async fn wait_for_idle(tracker: &JobTracker) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while tracker.active_monitor_count().await > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("poll loops did not finish in time");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
