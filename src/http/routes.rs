use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Recording lifecycle
        .route("/sessions/start", post(handlers::start_session))
        .route("/sessions/:session_id/pause", post(handlers::pause_session))
        .route(
            "/sessions/:session_id/resume",
            post(handlers::resume_session),
        )
        .route("/sessions/:session_id/stop", post(handlers::stop_session))
        .route("/sessions/:session_id", delete(handlers::discard_session))
        // Session queries
        .route(
            "/sessions/:session_id/status",
            get(handlers::get_session_status),
        )
        .route(
            "/sessions/:session_id/export",
            post(handlers::export_session),
        )
        .route(
            "/sessions/:session_id/transcript",
            get(handlers::get_session_transcript),
        )
        // Call rooms
        .route("/rooms", post(handlers::create_room).get(handlers::list_rooms))
        .route("/rooms/:room_id", get(handlers::get_room))
        .route("/rooms/:room_id/join", post(handlers::join_room))
        .route("/rooms/:room_id/leave", post(handlers::leave_room))
        // The API is driven by a browser UI, so CORS stays open; tracing
        // middleware logs every request.
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
