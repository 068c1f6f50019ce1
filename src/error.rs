//! Error types shared across the service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while acquiring or driving a capture backend.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user (or local policy) refused access to the requested source.
    #[error("capture permission denied: {0}")]
    PermissionDenied(String),

    /// The requested source does not exist in the current environment.
    #[error("capture source unavailable: {0}")]
    Unavailable(String),

    /// The backend itself misbehaved after acquisition.
    #[error("capture backend failed: {0}")]
    Failed(String),
}

/// Errors raised by the recording session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a recording session is already active")]
    AlreadyActive,

    #[error("no finalized artifact; stop the recording first")]
    NoArtifact,

    #[error("finalization failed: {0}")]
    Finalization(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Errors raised by the room registry.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room {0} not found")]
    RoomNotFound(String),

    #[error("participant {0} not found in room")]
    ParticipantNotFound(String),
}

/// Error payload returned to API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
