use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::capture::{CaptureBackendConfig, CapturePolicy};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
    pub storage: StorageConfig,
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    pub allow_screen: bool,
    pub allow_window: bool,
    pub allow_camera: bool,
    pub allow_microphone: bool,
    pub camera_attached: bool,
    pub chunk_interval_ms: u64,
    pub chunk_bytes: usize,
}

impl CaptureConfig {
    pub fn policy(&self) -> CapturePolicy {
        CapturePolicy {
            allow_screen: self.allow_screen,
            allow_window: self.allow_window,
            allow_camera: self.allow_camera,
            allow_microphone: self.allow_microphone,
            camera_attached: self.camera_attached,
        }
    }

    pub fn backend(&self) -> CaptureBackendConfig {
        CaptureBackendConfig {
            chunk_interval: Duration::from_millis(self.chunk_interval_ms),
            chunk_bytes: self.chunk_bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub downloads_path: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionConfig {
    pub delay_ms: u64,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
