use std::time::Duration;

use crate::capture::{CaptureBackendConfig, CaptureRequest};

/// Configuration for a recording session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., "session-2c3f...")
    pub session_id: String,

    /// Optional human-readable title
    pub title: Option<String>,

    /// What to capture, fixed for the whole session
    pub request: CaptureRequest,

    /// Cadence of the elapsed-time tick. One second in production; tests
    /// drive it on a paused clock.
    pub tick_interval: Duration,

    /// Emission cadence/sizing handed to the capture backend
    pub backend: CaptureBackendConfig,
}

impl SessionConfig {
    pub fn new(request: CaptureRequest) -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            title: None,
            request,
            tick_interval: Duration::from_secs(1),
            backend: CaptureBackendConfig::default(),
        }
    }
}
