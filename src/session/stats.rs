use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::CaptureSource;

/// Lifecycle phase of a recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No capture held, nothing recorded yet (or everything discarded)
    Idle,
    /// Capturing and counting elapsed time
    Recording,
    /// Capture held but quiet; elapsed time frozen
    Paused,
    /// Finalized; the artifact exists and the capture is released
    Stopped,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Recording => "recording",
            SessionPhase::Paused => "paused",
            SessionPhase::Stopped => "stopped",
        }
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Point-in-time snapshot of a session, serialized for API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    pub phase: SessionPhase,

    pub source: CaptureSource,

    pub include_microphone: bool,

    /// Whole seconds spent recording (pauses excluded)
    pub elapsed_secs: u64,

    /// When the session entered Recording for the first time
    pub started_at: Option<DateTime<Utc>>,

    /// Chunks collected so far
    pub chunk_count: usize,

    /// Size of the finalized artifact, once one exists
    pub artifact_bytes: Option<usize>,

    /// Whether a capture handle is currently held open
    pub capture_held: bool,
}
