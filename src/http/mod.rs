//! HTTP API server for the browser UI
//!
//! This module provides a REST API for recording sessions and call rooms:
//! - POST /sessions/start - Start a new recording
//! - POST /sessions/:id/pause | /resume | /stop - Drive the lifecycle
//! - DELETE /sessions/:id - Discard a session and release its resources
//! - GET  /sessions/:id/status - Query session state
//! - POST /sessions/:id/export - Save the finalized artifact to disk
//! - GET  /sessions/:id/transcript - Canned transcription of the artifact
//! - POST /rooms, /rooms/:id/join, /rooms/:id/leave - Call room roster flow
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
