//! Recording session management
//!
//! This module provides the `RecordingController` abstraction that owns:
//! - Capture acquisition through the backend factory
//! - The chunk collector (single consumer, arrival order preserved)
//! - The elapsed-time tick (at most one live tick per session)
//! - Finalization into the once-only immutable artifact
//! - Resource release on stop and discard

mod artifact;
mod config;
mod controller;
mod stats;

pub use artifact::Artifact;
pub use config::SessionConfig;
pub use controller::RecordingController;
pub use stats::{SessionPhase, SessionStats};
