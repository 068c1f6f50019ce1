// End-to-end recording lifecycle against the synthetic capture backend:
// start → pause → resume → stop → export → canned transcript.

use std::time::Duration;

use anyhow::Result;
use recroom::{
    CannedTranscriber, CapturePolicy, CaptureRequest, CaptureSource, FileExporter,
    RecordingController, SessionConfig, Transcriber,
};
use tokio::time::sleep;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = SessionConfig::new(CaptureRequest {
        source: CaptureSource::FullScreen,
        include_microphone: true,
    });
    let controller = RecordingController::new(config);

    controller.start(&CapturePolicy::default()).await?;
    info!("Recording for 3 seconds...");
    sleep(Duration::from_secs(3)).await;

    controller.pause().await?;
    info!("Paused for 2 seconds (elapsed time is frozen)");
    sleep(Duration::from_secs(2)).await;

    controller.resume().await?;
    info!("Recording for 2 more seconds...");
    sleep(Duration::from_secs(2)).await;

    let stats = controller.stop().await?;
    info!(
        "Stopped: {}s recorded, {} chunks collected",
        stats.elapsed_secs, stats.chunk_count
    );

    let artifact = controller.artifact().await?;
    let exporter = FileExporter::new("downloads");
    let receipt = exporter.export(&artifact, "record-demo").await?;
    info!("Exported to {} ({} bytes)", receipt.path, receipt.bytes_written);

    let transcriber = CannedTranscriber::new(Duration::from_millis(500));
    for segment in transcriber.transcribe(&artifact).await? {
        info!("Transcript: {}", segment.text);
    }

    Ok(())
}
