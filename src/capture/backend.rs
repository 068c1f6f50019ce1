use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use super::synthetic::SyntheticBackend;
use crate::error::CaptureError;

/// Which surface a session captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSource {
    /// The entire display.
    FullScreen,
    /// A single application window.
    ApplicationWindow,
    /// A user-facing camera.
    Camera,
}

impl CaptureSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureSource::FullScreen => "full_screen",
            CaptureSource::ApplicationWindow => "application_window",
            CaptureSource::Camera => "camera",
        }
    }
}

/// Which track a chunk carries. The controller never looks at this; it exists
/// so downstream consumers can tell muxed streams apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTrack {
    Video,
    Audio,
}

/// One opaque piece of encoded media handed over by a capturer.
#[derive(Debug, Clone)]
pub struct MediaChunk {
    /// Per-track sequence number (0-indexed)
    pub sequence: u64,
    /// Milliseconds since the capturer started
    pub timestamp_ms: u64,
    /// Which track the chunk belongs to
    pub track: ChunkTrack,
    /// Encoded bytes; size and format are the capturer's business
    pub data: Vec<u8>,
}

/// What a client asks to capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub source: CaptureSource,

    /// Attach a microphone stream to a screen/window capture. A camera
    /// capture carries its own muxed audio, so the flag is ignored there.
    #[serde(default)]
    pub include_microphone: bool,
}

/// Per-source allow flags, the local stand-in for the permission prompt a
/// browser or OS would show before handing out a capture stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturePolicy {
    pub allow_screen: bool,
    pub allow_window: bool,
    pub allow_camera: bool,
    pub allow_microphone: bool,

    /// Whether a camera device is present at all (distinct from permission)
    pub camera_attached: bool,
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self {
            allow_screen: true,
            allow_window: true,
            allow_camera: true,
            allow_microphone: true,
            camera_attached: true,
        }
    }
}

/// Emission cadence and sizing for a capture backend.
#[derive(Debug, Clone)]
pub struct CaptureBackendConfig {
    /// How often the capturer hands over a chunk
    pub chunk_interval: Duration,
    /// Payload size of each chunk in bytes
    pub chunk_bytes: usize,
}

impl Default for CaptureBackendConfig {
    fn default() -> Self {
        Self {
            chunk_interval: Duration::from_millis(250),
            chunk_bytes: 4096,
        }
    }
}

/// Capture backend trait
///
/// The recorder-side collaborator: once started it delivers chunks through a
/// channel at its own cadence, and pause/resume/stop drive the underlying
/// source. Stopping drops the sender so the receiver drains to closure.
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync + std::fmt::Debug {
    /// Open the underlying source and start emitting chunks.
    ///
    /// Returns the receiving end of the chunk channel.
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaChunk>, CaptureError>;

    /// Suspend chunk emission without releasing the source.
    async fn pause(&mut self) -> Result<(), CaptureError>;

    /// Resume chunk emission after a pause.
    async fn resume(&mut self) -> Result<(), CaptureError>;

    /// Stop emitting and release the source.
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Whether the source is currently held open.
    fn is_capturing(&self) -> bool;

    /// MIME label of the container the chunk stream forms.
    fn container(&self) -> &str;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// Capture backend factory
pub struct CaptureBackendFactory;

impl CaptureBackendFactory {
    /// Create a backend for the requested source, or refuse without holding
    /// any resource.
    pub fn create(
        request: &CaptureRequest,
        policy: &CapturePolicy,
        config: CaptureBackendConfig,
    ) -> Result<Box<dyn CaptureBackend>, CaptureError> {
        match request.source {
            CaptureSource::FullScreen if !policy.allow_screen => Err(
                CaptureError::PermissionDenied("screen capture is disabled".to_string()),
            ),
            CaptureSource::ApplicationWindow if !policy.allow_window => Err(
                CaptureError::PermissionDenied("window capture is disabled".to_string()),
            ),
            CaptureSource::Camera if !policy.camera_attached => Err(CaptureError::Unavailable(
                "no camera device attached".to_string(),
            )),
            CaptureSource::Camera if !policy.allow_camera => Err(CaptureError::PermissionDenied(
                "camera capture is disabled".to_string(),
            )),
            _ => {
                if request.include_microphone && !policy.allow_microphone {
                    return Err(CaptureError::PermissionDenied(
                        "microphone access is disabled".to_string(),
                    ));
                }

                Ok(Box::new(SyntheticBackend::new(request.clone(), config)))
            }
        }
    }
}
