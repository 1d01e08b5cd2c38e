//! Audio playback: controller, engine seam and the cpal/symphonia backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │              AudioPlayerController (UI thread)                  │
//! │   load / play / pause / seek, owns PlaybackStatus + LoadToken   │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ PlaybackEngine trait
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                CpalEngine decoder thread                        │
//! │   symphonia decode ─► rubato resample ─► chunk channel          │
//! │   posts EngineEvents (Prepared, TimeUpdate, ...) back           │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ cpal callback
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Audio device                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod controller;
mod decoder;
mod engine;
mod output;
mod resampler;
mod source;
mod state;

pub use controller::AudioPlayerController;
pub use engine::PlaybackEngine;
pub use output::CpalEngine;
pub use source::fetch_audio;
pub use state::{
    AudioData, EngineEvent, LoadRequest, LoadState, LoadToken, PlaybackStatus, time_string,
};

/// Player errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("Audio session setup failed: {0}")]
    Session(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Audio channel closed")]
    ChannelClosed,

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to fetch audio: {0}")]
    Fetch(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}
