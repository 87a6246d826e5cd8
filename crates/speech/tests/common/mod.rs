//! Shared helpers for the speech crate integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use avatar_core::synthesis::SynthesisRequest;
use avatar_speech::api::SpeechApiError;
use avatar_speech::backend::SynthesisBackend;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

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

/// Poll interval short enough to keep tests fast.
pub const FAST_POLL: Duration = Duration::from_millis(10);

/// Await a poll loop, failing the test if it does not finish in time.
pub async fn join_within(handle: JoinHandle<()>, limit: Duration) {
    tokio::time::timeout(limit, handle)
        .await
        .expect("poll loop did not terminate in time")
        .expect("poll loop panicked");
}
