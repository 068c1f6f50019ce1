// Integration tests for the canned transcription collaborator.

use std::time::Duration;

use anyhow::Result;
use recroom::{Artifact, CannedTranscriber, ChunkTrack, MediaChunk, Transcriber};

fn artifact() -> Artifact {
    let chunks = vec![MediaChunk {
        sequence: 0,
        timestamp_ms: 0,
        track: ChunkTrack::Video,
        data: vec![1, 2, 3, 4],
    }];
    Artifact::assemble("video/webm".to_string(), &chunks)
}

#[tokio::test(start_paused = true)]
async fn returns_the_same_canned_segments_every_time() -> Result<()> {
    let transcriber = CannedTranscriber::new(Duration::from_secs(2));
    let artifact = artifact();

    let first = transcriber.transcribe(&artifact).await?;
    let second = transcriber.transcribe(&artifact).await?;

    assert!(!first.is_empty());
    let first_texts: Vec<&str> = first.iter().map(|s| s.text.as_str()).collect();
    let second_texts: Vec<&str> = second.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(first_texts, second_texts);

    assert!(first.iter().all(|s| !s.partial));

    Ok(())
}
