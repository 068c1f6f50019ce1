use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::capture::{CaptureBackendConfig, CapturePolicy};
use crate::export::FileExporter;
use crate::room::RoomRegistry;
use crate::session::RecordingController;
use crate::transcript::Transcriber;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Recording sessions (session_id → controller)
    pub sessions: Arc<RwLock<HashMap<String, Arc<RecordingController>>>>,

    /// Active call rooms
    pub rooms: RoomRegistry,

    /// Capture permission/presence flags applied to every start request
    pub policy: CapturePolicy,

    /// Cadence/sizing handed to capture backends
    pub backend: CaptureBackendConfig,

    /// Where exported artifacts land
    pub exporter: Arc<FileExporter>,

    /// Transcription collaborator (canned in this build)
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(
        policy: CapturePolicy,
        backend: CaptureBackendConfig,
        exporter: FileExporter,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            rooms: RoomRegistry::new(),
            policy,
            backend,
            exporter: Arc::new(exporter),
            transcriber,
        }
    }
}
