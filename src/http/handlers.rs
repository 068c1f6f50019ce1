use super::state::AppState;
use crate::capture::{CaptureRequest, CaptureSource};
use crate::error::{CaptureError, ErrorBody, RoomError, SessionError};
use crate::session::{RecordingController, SessionConfig, SessionStats};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate one)
    pub session_id: Option<String>,

    /// Optional human-readable title
    pub title: Option<String>,

    /// What to capture
    pub source: CaptureSource,

    /// Attach a microphone stream to a screen/window capture
    #[serde(default)]
    pub include_microphone: bool,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DiscardSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportSessionRequest {
    /// Suggested filename; defaults to the session ID
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinRoomRequest {
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LeaveRoomRequest {
    pub participant_id: String,
}

#[derive(Debug, Serialize)]
pub struct LeaveRoomResponse {
    pub room_id: String,
    pub status: String,
}

// ============================================================================
// Error mapping
// ============================================================================

fn error_response(status: StatusCode, code: &str, message: String) -> Response {
    (
        status,
        Json(ErrorBody {
            code: code.to_string(),
            message,
        }),
    )
        .into_response()
}

fn session_error_response(err: SessionError) -> Response {
    let (status, code) = match &err {
        SessionError::AlreadyActive => (StatusCode::CONFLICT, "ALREADY_ACTIVE"),
        SessionError::NoArtifact => (StatusCode::CONFLICT, "NO_ARTIFACT"),
        SessionError::Finalization(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "FINALIZATION_FAILED")
        }
        SessionError::Capture(CaptureError::PermissionDenied(_)) => {
            (StatusCode::FORBIDDEN, "PERMISSION_DENIED")
        }
        SessionError::Capture(CaptureError::Unavailable(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "CAPTURE_UNAVAILABLE")
        }
        SessionError::Capture(CaptureError::Failed(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CAPTURE_FAILED")
        }
    };

    error_response(status, code, err.to_string())
}

fn room_error_response(err: RoomError) -> Response {
    let code = match &err {
        RoomError::RoomNotFound(_) => "ROOM_NOT_FOUND",
        RoomError::ParticipantNotFound(_) => "PARTICIPANT_NOT_FOUND",
    };

    error_response(StatusCode::NOT_FOUND, code, err.to_string())
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "SESSION_NOT_FOUND",
        format!("Session {} not found", session_id),
    )
}

async fn lookup_session(state: &AppState, session_id: &str) -> Option<Arc<RecordingController>> {
    let sessions = state.sessions.read().await;
    sessions.get(session_id).cloned()
}

// ============================================================================
// Session handlers
// ============================================================================

/// POST /sessions/start
/// Create a session and start capturing
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    info!("Starting recording for session: {}", session_id);

    // Check if the ID is already taken
    {
        let sessions = state.sessions.read().await;
        if sessions.contains_key(&session_id) {
            return error_response(
                StatusCode::CONFLICT,
                "DUPLICATE_SESSION",
                format!("Session {} already exists", session_id),
            );
        }
    }

    let mut config = SessionConfig::new(CaptureRequest {
        source: req.source,
        include_microphone: req.include_microphone,
    });
    config.session_id = session_id.clone();
    config.title = req.title;
    config.backend = state.backend.clone();

    let controller = Arc::new(RecordingController::new(config));

    if let Err(e) = controller.start(&state.policy).await {
        error!("Failed to start recording: {}", e);
        return session_error_response(e);
    }

    {
        let mut sessions = state.sessions.write().await;
        sessions.insert(session_id.clone(), controller);
    }

    info!("Recording started successfully for session: {}", session_id);

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "recording".to_string(),
            message: format!("Recording started for session {}", session_id),
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/pause
pub async fn pause_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match controller.pause().await {
        Ok(()) => (StatusCode::OK, Json(controller.stats().await)).into_response(),
        Err(e) => {
            error!("Failed to pause session {}: {}", session_id, e);
            session_error_response(e)
        }
    }
}

/// POST /sessions/:session_id/resume
pub async fn resume_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match controller.resume().await {
        Ok(()) => (StatusCode::OK, Json(controller.stats().await)).into_response(),
        Err(e) => {
            error!("Failed to resume session {}: {}", session_id, e);
            session_error_response(e)
        }
    }
}

/// POST /sessions/:session_id/stop
/// Finalize the recording; the session stays queryable for export/transcript.
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    match controller.stop().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => {
            error!("Failed to stop session {}: {}", session_id, e);
            session_error_response(e)
        }
    }
}

/// DELETE /sessions/:session_id
/// Discard a session: release resources, drop chunks and artifact.
pub async fn discard_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let removed = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match removed {
        Some(controller) => {
            controller.discard().await;
            (
                StatusCode::OK,
                Json(DiscardSessionResponse {
                    session_id: session_id.clone(),
                    status: "idle".to_string(),
                    message: format!("Session {} discarded", session_id),
                }),
            )
                .into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/status
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    let stats: SessionStats = controller.stats().await;
    (StatusCode::OK, Json(stats)).into_response()
}

/// POST /sessions/:session_id/export
/// Save the finalized artifact as a local file.
pub async fn export_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ExportSessionRequest>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    let artifact = match controller.artifact().await {
        Ok(artifact) => artifact,
        Err(e) => return session_error_response(e),
    };

    let suggested = req.filename.unwrap_or_else(|| session_id.clone());
    match state.exporter.export(&artifact, &suggested).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => {
            error!("Failed to export session {}: {}", session_id, e);
            session_error_response(e)
        }
    }
}

/// GET /sessions/:session_id/transcript
/// Run the transcription collaborator over the finalized artifact.
pub async fn get_session_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let Some(controller) = lookup_session(&state, &session_id).await else {
        return session_not_found(&session_id);
    };

    let artifact = match controller.artifact().await {
        Ok(artifact) => artifact,
        Err(e) => return session_error_response(e),
    };

    match state.transcriber.transcribe(&artifact).await {
        Ok(segments) => (StatusCode::OK, Json(segments)).into_response(),
        Err(e) => {
            error!("Failed to transcribe session {}: {}", session_id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "TRANSCRIPTION_FAILED",
                e.to_string(),
            )
        }
    }
}

// ============================================================================
// Room handlers
// ============================================================================

/// POST /rooms
/// Create a room; the creator joins immediately.
pub async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> impl IntoResponse {
    let room = state.rooms.create(&req.display_name).await;
    (StatusCode::OK, Json(room)).into_response()
}

/// GET /rooms
pub async fn list_rooms(State(state): State<AppState>) -> impl IntoResponse {
    let rooms = state.rooms.list().await;
    (StatusCode::OK, Json(rooms)).into_response()
}

/// GET /rooms/:room_id
pub async fn get_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> impl IntoResponse {
    match state.rooms.get(&room_id).await {
        Ok(room) => (StatusCode::OK, Json(room)).into_response(),
        Err(e) => room_error_response(e),
    }
}

/// POST /rooms/:room_id/join
pub async fn join_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<JoinRoomRequest>,
) -> impl IntoResponse {
    match state.rooms.join(&room_id, &req.display_name).await {
        Ok(participant) => (StatusCode::OK, Json(participant)).into_response(),
        Err(e) => room_error_response(e),
    }
}

/// POST /rooms/:room_id/leave
pub async fn leave_room(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(req): Json<LeaveRoomRequest>,
) -> impl IntoResponse {
    match state.rooms.leave(&room_id, &req.participant_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(LeaveRoomResponse {
                room_id,
                status: "left".to_string(),
            }),
        )
            .into_response(),
        Err(e) => room_error_response(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
