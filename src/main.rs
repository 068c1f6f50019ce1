use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use recroom::{
    create_router, AppState, CannedTranscriber, CaptureRequest, CaptureSource, Config,
    FileExporter, RecordingController, SessionConfig,
};

#[derive(Parser)]
#[command(
    name = "recroom",
    about = "Screen/camera recording sessions and voice-call rooms over a local REST API"
)]
struct Cli {
    /// Path to the configuration file (without extension)
    #[arg(long, default_value = "config/recroom")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP service (the default)
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Record one synthetic session end to end and export the artifact
    Record {
        /// Capture source: full_screen, application_window, or camera
        #[arg(long, default_value = "full_screen")]
        source: String,

        /// Attach a microphone stream to a screen/window capture
        #[arg(long)]
        microphone: bool,

        /// How long to record before stopping
        #[arg(long, default_value_t = 5)]
        seconds: u64,

        /// Suggested filename for the exported artifact
        #[arg(long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config))?;

    match cli.command.unwrap_or(Command::Serve {
        bind: None,
        port: None,
    }) {
        Command::Serve { bind, port } => serve(cfg, bind, port).await,
        Command::Record {
            source,
            microphone,
            seconds,
            output,
        } => record(cfg, &source, microphone, seconds, output).await,
    }
}

async fn serve(cfg: Config, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| cfg.service.http.bind.clone());
    let port = port.unwrap_or(cfg.service.http.port);

    let state = AppState::new(
        cfg.capture.policy(),
        cfg.capture.backend(),
        FileExporter::new(&cfg.storage.downloads_path),
        Arc::new(CannedTranscriber::new(Duration::from_millis(
            cfg.transcription.delay_ms,
        ))),
    );

    let app = create_router(state);
    let addr = format!("{bind}:{port}");

    info!("{} listening on {}", cfg.service.name, addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn record(
    cfg: Config,
    source: &str,
    microphone: bool,
    seconds: u64,
    output: Option<String>,
) -> Result<()> {
    let source = parse_source(source)?;

    let mut config = SessionConfig::new(CaptureRequest {
        source,
        include_microphone: microphone,
    });
    config.backend = cfg.capture.backend();

    let controller = RecordingController::new(config);
    controller.start(&cfg.capture.policy()).await?;

    info!("Recording {} for {} seconds...", source.as_str(), seconds);
    tokio::time::sleep(Duration::from_secs(seconds)).await;

    let stats = controller.stop().await?;
    info!(
        "Stopped after {}s with {} chunks",
        stats.elapsed_secs, stats.chunk_count
    );

    let artifact = controller.artifact().await?;
    let exporter = FileExporter::new(&cfg.storage.downloads_path);
    let suggested = output.unwrap_or_else(|| stats.session_id.clone());
    let receipt = exporter.export(&artifact, &suggested).await?;

    info!("Saved {} bytes to {}", receipt.bytes_written, receipt.path);

    Ok(())
}

fn parse_source(source: &str) -> Result<CaptureSource> {
    match source {
        "full_screen" | "screen" => Ok(CaptureSource::FullScreen),
        "application_window" | "window" => Ok(CaptureSource::ApplicationWindow),
        "camera" => Ok(CaptureSource::Camera),
        other => bail!("unknown capture source: {other} (expected full_screen, application_window, or camera)"),
    }
}
