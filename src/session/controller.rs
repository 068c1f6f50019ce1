use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::artifact::Artifact;
use super::config::SessionConfig;
use super::stats::{SessionPhase, SessionStats};
use crate::capture::{CaptureBackend, CaptureBackendFactory, CapturePolicy, MediaChunk};
use crate::error::SessionError;

/// Fallback container label when a backend vanishes before finalization.
const UNKNOWN_CONTAINER: &str = "application/octet-stream";

/// A recording session controller that owns the full capture-to-artifact
/// lifecycle: one capture backend, one elapsed-time tick task, one chunk
/// collector, and the once-only finalized artifact.
///
/// Every lifecycle method serializes on a single internal lock, so concurrent
/// requests observe consistent phases and a second start during a pending
/// acquisition is rejected rather than interleaved.
pub struct RecordingController {
    /// Session configuration
    config: SessionConfig,

    /// Whole seconds spent in Recording, advanced only by the tick task
    elapsed_secs: Arc<AtomicU64>,

    /// Chunks collected so far (kept outside the lock for cheap snapshots)
    chunk_count: Arc<AtomicUsize>,

    /// Ordered chunk buffer, shared only with the collector task
    chunks: Arc<Mutex<Vec<MediaChunk>>>,

    /// Lifecycle state; one lock, so transitions serialize
    inner: Mutex<Inner>,
}

struct Inner {
    phase: SessionPhase,
    backend: Option<Box<dyn CaptureBackend>>,
    tick_task: Option<JoinHandle<()>>,
    collector_task: Option<JoinHandle<()>>,
    artifact: Option<Artifact>,
    started_at: Option<DateTime<Utc>>,
}

impl RecordingController {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            elapsed_secs: Arc::new(AtomicU64::new(0)),
            chunk_count: Arc::new(AtomicUsize::new(0)),
            chunks: Arc::new(Mutex::new(Vec::new())),
            inner: Mutex::new(Inner {
                phase: SessionPhase::Idle,
                backend: None,
                tick_task: None,
                collector_task: None,
                artifact: None,
                started_at: None,
            }),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    /// Idle → Recording: acquire the capture source, start the collector and
    /// the elapsed-time tick.
    ///
    /// A refused or failed acquisition leaves the controller Idle with no
    /// resources held.
    pub async fn start(&self, policy: &CapturePolicy) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase != SessionPhase::Idle {
            return Err(SessionError::AlreadyActive);
        }

        info!(
            "Starting recording session {} ({}, microphone: {})",
            self.config.session_id,
            self.config.request.source.as_str(),
            self.config.request.include_microphone
        );

        // Leftovers from a discarded run must not leak into this one.
        self.elapsed_secs.store(0, Ordering::SeqCst);
        self.chunk_count.store(0, Ordering::SeqCst);
        self.chunks.lock().await.clear();
        inner.artifact = None;

        let mut backend = CaptureBackendFactory::create(
            &self.config.request,
            policy,
            self.config.backend.clone(),
        )?;

        let chunk_rx = match backend.start().await {
            Ok(rx) => rx,
            Err(e) => {
                error!("Capture acquisition failed: {}", e);
                drop(backend);
                return Err(e.into());
            }
        };

        inner.collector_task = Some(self.spawn_collector(chunk_rx));
        Self::spawn_tick(
            &mut inner.tick_task,
            self.config.tick_interval,
            Arc::clone(&self.elapsed_secs),
        );

        inner.backend = Some(backend);
        inner.started_at = Some(Utc::now());
        inner.phase = SessionPhase::Recording;

        Ok(())
    }

    /// Recording → Paused: quiet the capturer and cancel the tick.
    ///
    /// A pause request in any other phase is a logged no-op.
    pub async fn pause(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase != SessionPhase::Recording {
            warn!(
                "Pause requested for {} while {}; ignoring",
                self.config.session_id,
                inner.phase.as_str()
            );
            return Ok(());
        }

        if let Some(backend) = inner.backend.as_mut() {
            backend.pause().await?;
        }
        Self::cancel_tick(&mut inner.tick_task);
        inner.phase = SessionPhase::Paused;

        info!("Recording session {} paused", self.config.session_id);
        Ok(())
    }

    /// Paused → Recording: wake the capturer and restart exactly one tick.
    ///
    /// A resume request in any other phase is a logged no-op.
    pub async fn resume(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock().await;
        if inner.phase != SessionPhase::Paused {
            warn!(
                "Resume requested for {} while {}; ignoring",
                self.config.session_id,
                inner.phase.as_str()
            );
            return Ok(());
        }

        if let Some(backend) = inner.backend.as_mut() {
            backend.resume().await?;
        }
        Self::spawn_tick(
            &mut inner.tick_task,
            self.config.tick_interval,
            Arc::clone(&self.elapsed_secs),
        );
        inner.phase = SessionPhase::Recording;

        info!("Recording session {} resumed", self.config.session_id);
        Ok(())
    }

    /// Recording/Paused → Stopped: drain the chunk stream, assemble the
    /// artifact, release the capture handle.
    ///
    /// This is the only place the artifact is produced. Stopping an Idle or
    /// already-Stopped session is a logged no-op that returns current stats.
    pub async fn stop(&self) -> Result<SessionStats, SessionError> {
        let mut inner = self.inner.lock().await;
        match inner.phase {
            SessionPhase::Recording | SessionPhase::Paused => {}
            other => {
                warn!(
                    "Stop requested for {} while {}; ignoring",
                    self.config.session_id,
                    other.as_str()
                );
                return Ok(self.snapshot(&inner));
            }
        }

        info!("Stopping recording session {}", self.config.session_id);

        Self::cancel_tick(&mut inner.tick_task);

        let container = inner
            .backend
            .as_ref()
            .map(|b| b.container().to_string())
            .unwrap_or_else(|| UNKNOWN_CONTAINER.to_string());

        // Release the capturer first: dropping its senders closes the chunk
        // channel, which lets the collector drain every in-flight chunk and
        // exit on its own.
        if let Some(mut backend) = inner.backend.take() {
            if let Err(e) = backend.stop().await {
                error!("Capture backend failed to stop cleanly: {}", e);
            }
        }

        if let Some(collector) = inner.collector_task.take() {
            if let Err(e) = collector.await {
                error!("Chunk collector task failed: {}", e);
            }
        }

        let chunks = self.chunks.lock().await;
        let artifact = Artifact::assemble(container, &chunks);
        drop(chunks);

        info!(
            "Recording session {} finalized: {} chunks, {} bytes",
            self.config.session_id,
            artifact.chunk_count,
            artifact.data.len()
        );

        inner.artifact = Some(artifact);
        inner.phase = SessionPhase::Stopped;

        Ok(self.snapshot(&inner))
    }

    /// Any phase → Idle: release whatever is held and clear everything.
    /// Idempotent; discarding twice releases nothing twice.
    pub async fn discard(&self) {
        let mut inner = self.inner.lock().await;

        info!(
            "Discarding recording session {} (was {})",
            self.config.session_id,
            inner.phase.as_str()
        );

        Self::cancel_tick(&mut inner.tick_task);
        if let Some(collector) = inner.collector_task.take() {
            collector.abort();
        }
        if let Some(mut backend) = inner.backend.take() {
            if let Err(e) = backend.stop().await {
                warn!("Capture backend failed to stop on discard: {}", e);
            }
        }

        self.chunks.lock().await.clear();
        self.elapsed_secs.store(0, Ordering::SeqCst);
        self.chunk_count.store(0, Ordering::SeqCst);
        inner.artifact = None;
        inner.started_at = None;
        inner.phase = SessionPhase::Idle;
    }

    /// The finalized artifact, if the session has been stopped.
    pub async fn artifact(&self) -> Result<Artifact, SessionError> {
        let inner = self.inner.lock().await;
        inner.artifact.clone().ok_or(SessionError::NoArtifact)
    }

    /// Point-in-time snapshot of the session.
    pub async fn stats(&self) -> SessionStats {
        let inner = self.inner.lock().await;
        self.snapshot(&inner)
    }

    fn snapshot(&self, inner: &Inner) -> SessionStats {
        SessionStats {
            session_id: self.config.session_id.clone(),
            phase: inner.phase,
            source: self.config.request.source,
            include_microphone: self.config.request.include_microphone,
            elapsed_secs: self.elapsed_secs.load(Ordering::SeqCst),
            started_at: inner.started_at,
            chunk_count: self.chunk_count.load(Ordering::SeqCst),
            artifact_bytes: inner.artifact.as_ref().map(|a| a.data.len()),
            capture_held: inner.backend.is_some(),
        }
    }

    /// The collector is the single consumer of the capturer's chunk channel;
    /// it appends in arrival order and exits when the channel closes.
    fn spawn_collector(&self, mut chunk_rx: mpsc::Receiver<MediaChunk>) -> JoinHandle<()> {
        let chunks = Arc::clone(&self.chunks);
        let chunk_count = Arc::clone(&self.chunk_count);

        tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                let mut buffer = chunks.lock().await;
                buffer.push(chunk);
                chunk_count.store(buffer.len(), Ordering::SeqCst);
            }
        })
    }

    /// Start the elapsed-time tick, refusing to stack a second one.
    fn spawn_tick(slot: &mut Option<JoinHandle<()>>, period: Duration, elapsed: Arc<AtomicU64>) {
        if slot.is_some() {
            warn!("Tick task already running; not starting another");
            return;
        }

        *slot = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await; // the first tick completes immediately
            loop {
                interval.tick().await;
                elapsed.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    fn cancel_tick(slot: &mut Option<JoinHandle<()>>) {
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}
