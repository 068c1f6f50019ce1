use chrono::{DateTime, Utc};

use crate::capture::MediaChunk;

/// The finalized recording: every chunk the capturer delivered, concatenated
/// in arrival order into one immutable byte buffer.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// MIME label inherited from the capture backend
    pub container: String,

    /// The assembled bytes
    pub data: Vec<u8>,

    /// How many chunks went into the buffer
    pub chunk_count: usize,

    /// When finalization happened
    pub finalized_at: DateTime<Utc>,
}

impl Artifact {
    /// Concatenate chunks in the order they arrived.
    pub fn assemble(container: String, chunks: &[MediaChunk]) -> Self {
        let total: usize = chunks.iter().map(|c| c.data.len()).sum();
        let mut data = Vec::with_capacity(total);
        for chunk in chunks {
            data.extend_from_slice(&chunk.data);
        }

        Self {
            container,
            data,
            chunk_count: chunks.len(),
            finalized_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// File extension matching the container label.
    pub fn extension(&self) -> &'static str {
        match self.container.as_str() {
            "video/webm" | "audio/webm" => "webm",
            _ => "bin",
        }
    }
}
