//! In-memory job status cache with one background poll loop per job.
//!
//! [`JobTracker`] owns the map from job ID to last-known [`JobRecord`].
//! Two writers keep it fresh:
//!
//! - the detached poll loop started by [`JobTracker::start_monitoring`],
//!   which queries the vendor every poll interval until the job reaches a
//!   terminal status, and records a terminal `Error` if a query fails;
//! - [`JobTracker::get_status`], which refreshes a non-terminal entry
//!   synchronously. A failed refresh is returned to the caller and the cache
//!   is left as it was.
//!
//! Writes are plain overwrites per key; the last writer wins. The lock is
//! never held across a vendor call.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use avatar_core::job::JobRecord;
use avatar_core::types::JobId;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::SpeechApiError;
use crate::backend::SynthesisBackend;

/// Shared job status store and poller.
///
/// Created once at startup via [`JobTracker::new`]. The returned `Arc` can
/// be cheaply cloned into request handlers.
pub struct JobTracker {
    backend: Arc<dyn SynthesisBackend>,
    poll_interval: Duration,
    state: RwLock<TrackerState>,
    /// Fired on shutdown; stops every poll loop.
    cancel: CancellationToken,
}

#[derive(Default)]
struct TrackerState {
    /// Insertion-ordered so job listings follow submission order.
    jobs: IndexMap<JobId, JobRecord>,
    /// Jobs with a live poll loop.
    monitored: HashSet<JobId>,
}

impl JobTracker {
    pub fn new(backend: Arc<dyn SynthesisBackend>, poll_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            backend,
            poll_interval,
            state: RwLock::new(TrackerState::default()),
            cancel: CancellationToken::new(),
        })
    }

    /// Mark a freshly submitted job as `Running` before any poll happens.
    pub async fn record_initial(&self, job_id: &str) {
        self.store(job_id, JobRecord::running(job_id)).await;
    }

    /// Spawn the background poll loop for `job_id`.
    ///
    /// Returns `None` without spawning if a loop for this job is already
    /// running, so there is never more than one per job.
    pub async fn start_monitoring(self: &Arc<Self>, job_id: &str) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.write().await;
            if !state.monitored.insert(job_id.to_string()) {
                tracing::warn!(job_id, "Poll loop already active, not starting another");
                return None;
            }
        }

        let tracker = Arc::clone(self);
        let job_id = job_id.to_string();
        Some(tokio::spawn(tracker.poll_loop(job_id)))
    }

    /// Return the job's status document, refreshing it from the vendor
    /// unless the cached status is terminal.
    ///
    /// Unknown IDs are looked up directly and cached on success. A failed
    /// vendor query is returned as-is and does not touch the cache.
    pub async fn get_status(&self, job_id: &str) -> Result<Value, SpeechApiError> {
        if let Some(record) = self.get(job_id).await {
            if record.status.is_terminal() {
                return Ok(record.payload);
            }
        }

        let payload = match self.backend.get_job(job_id).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::debug!(job_id, "Status refresh failed, cache left unchanged");
                return Err(e);
            }
        };

        self.store(job_id, JobRecord::from_vendor(payload.clone())).await;
        Ok(payload)
    }

    /// Snapshot of the cached record for `job_id`, if any.
    pub async fn get(&self, job_id: &str) -> Option<JobRecord> {
        self.state.read().await.jobs.get(job_id).cloned()
    }

    /// All known job IDs, in the order they were first cached.
    pub async fn list_ids(&self) -> Vec<JobId> {
        self.state.read().await.jobs.keys().cloned().collect()
    }

    pub async fn is_monitoring(&self, job_id: &str) -> bool {
        self.state.read().await.monitored.contains(job_id)
    }

    pub async fn active_monitor_count(&self) -> usize {
        self.state.read().await.monitored.len()
    }

    /// Stop every poll loop. Cached records keep their last status.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    // ---- private helpers ----

    async fn store(&self, job_id: &str, record: JobRecord) {
        self.state
            .write()
            .await
            .jobs
            .insert(job_id.to_string(), record);
    }

    async fn poll_loop(self: Arc<Self>, job_id: JobId) {
        tracing::debug!(
            job_id = %job_id,
            interval_ms = self.poll_interval.as_millis() as u64,
            "Poll loop started",
        );

        loop {
            let result = tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!(job_id = %job_id, "Poll loop cancelled");
                    break;
                }
                result = self.backend.get_job(&job_id) => result,
            };

            match result {
                Ok(payload) => {
                    let record = JobRecord::from_vendor(payload);
                    let status = record.status;
                    self.store(&job_id, record).await;

                    if status.is_terminal() {
                        tracing::info!(job_id = %job_id, %status, "Job finished");
                        break;
                    }
                    tracing::debug!(job_id = %job_id, %status, "Job still in progress");
                }
                Err(e) => {
                    tracing::error!(job_id = %job_id, error = %e, "Status poll failed, monitoring stopped");
                    self.store(&job_id, JobRecord::error(e.detail())).await;
                    break;
                }
            }

            tokio::select! {
                _ = self.cancel.cancelled() => {
                    tracing::debug!(job_id = %job_id, "Poll loop cancelled");
                    break;
                }
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        self.state.write().await.monitored.remove(&job_id);
    }
}
