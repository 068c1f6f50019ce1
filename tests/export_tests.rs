// Integration tests for artifact assembly and file export.

use std::time::Duration;

use anyhow::Result;
use recroom::{
    Artifact, CapturePolicy, CaptureRequest, CaptureSource, ChunkTrack, FileExporter, MediaChunk,
    RecordingController, SessionConfig, SessionError,
};
use tempfile::TempDir;
use tokio::time::sleep;

fn chunk(sequence: u64, data: &[u8]) -> MediaChunk {
    MediaChunk {
        sequence,
        timestamp_ms: sequence * 100,
        track: ChunkTrack::Video,
        data: data.to_vec(),
    }
}

#[test]
fn artifact_concatenates_chunks_in_arrival_order() {
    let chunks = vec![chunk(0, b"head"), chunk(1, b"-mid-"), chunk(2, b"tail")];
    let artifact = Artifact::assemble("video/webm".to_string(), &chunks);

    assert_eq!(artifact.data, b"head-mid-tail");
    assert_eq!(artifact.chunk_count, 3);
    assert_eq!(artifact.extension(), "webm");
    assert!(!artifact.is_empty());
}

#[tokio::test]
async fn exporting_twice_produces_byte_identical_files() -> Result<()> {
    let downloads = TempDir::new()?;
    let exporter = FileExporter::new(downloads.path());

    let artifact = Artifact::assemble(
        "video/webm".to_string(),
        &[chunk(0, b"alpha"), chunk(1, b"beta")],
    );

    let first = exporter.export(&artifact, "take-one").await?;
    let second = exporter.export(&artifact, "take-two").await?;

    let first_bytes = std::fs::read(&first.path)?;
    let second_bytes = std::fs::read(&second.path)?;
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first_bytes, artifact.data);
    assert_eq!(first.bytes_written, artifact.data.len());

    Ok(())
}

#[tokio::test]
async fn export_sanitizes_suggested_filenames() -> Result<()> {
    let downloads = TempDir::new()?;
    let exporter = FileExporter::new(downloads.path());
    let artifact = Artifact::assemble("video/webm".to_string(), &[chunk(0, b"x")]);

    let receipt = exporter.export(&artifact, "my demo!! take #1").await?;
    let file_name = std::path::Path::new(&receipt.path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    assert!(file_name.ends_with(".webm"));
    assert!(!file_name.contains(' '));
    assert!(!file_name.contains('!'));
    assert!(!file_name.contains('#'));

    // A name that already carries the extension does not get a second one
    let receipt = exporter.export(&artifact, "demo.webm").await?;
    assert!(receipt.path.ends_with("demo.webm"));
    assert!(!receipt.path.ends_with(".webm.webm"));

    Ok(())
}

#[tokio::test]
async fn export_falls_back_to_a_default_stem() -> Result<()> {
    let downloads = TempDir::new()?;
    let exporter = FileExporter::new(downloads.path());
    let artifact = Artifact::assemble("video/webm".to_string(), &[chunk(0, b"x")]);

    let receipt = exporter.export(&artifact, "???").await?;
    assert!(receipt.path.ends_with("recording.webm"));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn recorded_session_exports_byte_identical_artifact() -> Result<()> {
    let downloads = TempDir::new()?;

    let config = SessionConfig::new(CaptureRequest {
        source: CaptureSource::FullScreen,
        include_microphone: false,
    });
    let controller = RecordingController::new(config);

    controller.start(&CapturePolicy::default()).await?;
    sleep(Duration::from_millis(1_100)).await;
    controller.stop().await?;

    let artifact = controller.artifact().await?;
    let exporter = FileExporter::new(downloads.path());
    let receipt = exporter.export(&artifact, "session-export").await?;

    let on_disk = std::fs::read(&receipt.path)?;
    assert_eq!(on_disk, artifact.data);

    Ok(())
}

#[tokio::test]
async fn export_is_refused_before_stop() -> Result<()> {
    let config = SessionConfig::new(CaptureRequest {
        source: CaptureSource::FullScreen,
        include_microphone: false,
    });
    let controller = RecordingController::new(config);
    controller.start(&CapturePolicy::default()).await?;

    assert!(matches!(
        controller.artifact().await,
        Err(SessionError::NoArtifact)
    ));

    controller.discard().await;
    Ok(())
}
