//! Transcription collaborator
//!
//! The real system hands finished recordings to an external transcription
//! service. This crate ships only the canned stand-in: it fabricates the same
//! fixed segments after a configurable delay, and nothing downstream may
//! treat its output as real speech-to-text.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::session::Artifact;

/// A single transcript segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Transcribed text
    pub text: String,

    /// When this segment was produced
    pub timestamp: DateTime<Utc>,

    /// Confidence score (0.0 to 1.0), if the provider reports one
    pub confidence: Option<f32>,

    /// Whether this is a partial (interim) result
    pub partial: bool,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, artifact: &Artifact) -> anyhow::Result<Vec<TranscriptSegment>>;
}

const CANNED_LINES: [&str; 3] = [
    "Thanks everyone for joining today's session.",
    "We walked through the quarterly roadmap and the open action items.",
    "Next sync is scheduled for the same time next week.",
];

/// Returns the same fabricated transcript for every artifact, after a delay
/// that reads like processing time.
pub struct CannedTranscriber {
    delay: Duration,
}

impl CannedTranscriber {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Transcriber for CannedTranscriber {
    async fn transcribe(&self, artifact: &Artifact) -> anyhow::Result<Vec<TranscriptSegment>> {
        info!(
            "Transcribing {} bytes; returning {} canned segments",
            artifact.data.len(),
            CANNED_LINES.len()
        );

        tokio::time::sleep(self.delay).await;

        Ok(CANNED_LINES
            .iter()
            .map(|line| TranscriptSegment {
                text: (*line).to_string(),
                timestamp: Utc::now(),
                confidence: None,
                partial: false,
            })
            .collect())
    }
}
