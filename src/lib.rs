pub mod capture;
pub mod config;
pub mod error;
pub mod export;
pub mod http;
pub mod room;
pub mod session;
pub mod transcript;

pub use capture::{
    CaptureBackend, CaptureBackendConfig, CaptureBackendFactory, CapturePolicy, CaptureRequest,
    CaptureSource, ChunkTrack, MediaChunk, SyntheticBackend,
};
pub use config::Config;
pub use error::{CaptureError, RoomError, SessionError};
pub use export::{ExportReceipt, FileExporter};
pub use http::{create_router, AppState};
pub use room::{Participant, Room, RoomRegistry};
pub use session::{Artifact, RecordingController, SessionConfig, SessionPhase, SessionStats};
pub use transcript::{CannedTranscriber, Transcriber, TranscriptSegment};
