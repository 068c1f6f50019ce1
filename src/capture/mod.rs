pub mod backend;
pub mod synthetic;

pub use backend::{
    CaptureBackend, CaptureBackendConfig, CaptureBackendFactory, CapturePolicy, CaptureRequest,
    CaptureSource, ChunkTrack, MediaChunk,
};
pub use synthetic::SyntheticBackend;
