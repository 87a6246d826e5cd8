use std::sync::Arc;

use avatar_speech::backend::SynthesisBackend;
use avatar_speech::gateway::SynthesisGateway;
use avatar_speech::tracker::JobTracker;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Forwards new synthesis requests to the vendor.
    pub gateway: Arc<SynthesisGateway>,
    /// Job status cache and background pollers.
    pub tracker: Arc<JobTracker>,
}

impl AppState {
    /// Wire the gateway and tracker to one vendor backend.
    pub fn new(config: ServerConfig, backend: Arc<dyn SynthesisBackend>) -> Self {
        let tracker = JobTracker::new(Arc::clone(&backend), config.speech.poll_interval);
        Self {
            config: Arc::new(config),
            gateway: Arc::new(SynthesisGateway::new(backend)),
            tracker,
        }
    }
}
