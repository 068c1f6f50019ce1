//! Deterministic capture backend.
//!
//! Stands in for a platform recorder: emits container-tagged binary chunks on
//! a fixed interval, honors pause/resume without tearing the stream down, and
//! closes the chunk channel when stopped. The service, the demos, and the
//! tests all run against it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use super::backend::{
    CaptureBackend, CaptureBackendConfig, CaptureRequest, CaptureSource, ChunkTrack, MediaChunk,
};
use crate::error::CaptureError;

/// EBML magic prefixing the first chunk, the way a Matroska/WebM recorder
/// opens its stream.
const CONTAINER_MAGIC: [u8; 4] = [0x1a, 0x45, 0xdf, 0xa3];

/// Channel depth between the generators and the collector.
const CHUNK_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct SyntheticBackend {
    request: CaptureRequest,
    config: CaptureBackendConfig,
    paused: Arc<AtomicBool>,
    capturing: bool,
    generators: Vec<JoinHandle<()>>,
}

impl SyntheticBackend {
    pub fn new(request: CaptureRequest, config: CaptureBackendConfig) -> Self {
        Self {
            request,
            config,
            paused: Arc::new(AtomicBool::new(false)),
            capturing: false,
            generators: Vec::new(),
        }
    }

    /// Deterministic payload for a chunk, seeded by its sequence number.
    fn chunk_payload(sequence: u64, len: usize) -> Vec<u8> {
        (0..len)
            .map(|i| (sequence.wrapping_mul(31).wrapping_add(i as u64) & 0xff) as u8)
            .collect()
    }

    fn spawn_generator(
        tx: mpsc::Sender<MediaChunk>,
        paused: Arc<AtomicBool>,
        config: CaptureBackendConfig,
        track: ChunkTrack,
        with_header: bool,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.chunk_interval);
            interval.tick().await; // the first tick completes immediately
            let started = tokio::time::Instant::now();
            let mut sequence = 0u64;

            loop {
                interval.tick().await;
                if paused.load(Ordering::SeqCst) {
                    continue;
                }

                let mut data = Vec::new();
                if sequence == 0 && with_header {
                    data.extend_from_slice(&CONTAINER_MAGIC);
                }
                data.extend(Self::chunk_payload(sequence, config.chunk_bytes));

                let chunk = MediaChunk {
                    sequence,
                    timestamp_ms: started.elapsed().as_millis() as u64,
                    track,
                    data,
                };

                if tx.send(chunk).await.is_err() {
                    break; // receiver gone, nothing left to capture for
                }
                sequence += 1;
            }
        })
    }
}

#[async_trait::async_trait]
impl CaptureBackend for SyntheticBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<MediaChunk>, CaptureError> {
        if self.capturing {
            return Err(CaptureError::Failed(
                "capture already started".to_string(),
            ));
        }

        info!(
            "Opening synthetic {} capture (microphone: {})",
            self.request.source.as_str(),
            self.request.include_microphone
        );

        let (tx, rx) = mpsc::channel(CHUNK_CHANNEL_CAPACITY);

        self.generators.push(Self::spawn_generator(
            tx.clone(),
            Arc::clone(&self.paused),
            self.config.clone(),
            ChunkTrack::Video,
            true,
        ));

        // A screen/window capture gets its microphone as a second stream
        // feeding the same channel; the camera muxes its own audio.
        let separate_mic = self.request.include_microphone
            && self.request.source != CaptureSource::Camera;
        if separate_mic {
            self.generators.push(Self::spawn_generator(
                tx,
                Arc::clone(&self.paused),
                self.config.clone(),
                ChunkTrack::Audio,
                false,
            ));
        }

        self.capturing = true;
        Ok(rx)
    }

    async fn pause(&mut self) -> Result<(), CaptureError> {
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), CaptureError> {
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        // Aborting the generators drops every sender, which closes the chunk
        // channel once buffered chunks are drained.
        for generator in self.generators.drain(..) {
            generator.abort();
        }
        self.capturing = false;
        info!("Synthetic {} capture released", self.request.source.as_str());
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing
    }

    fn container(&self) -> &str {
        "video/webm"
    }

    fn name(&self) -> &str {
        "synthetic"
    }
}
