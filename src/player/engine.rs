//! The platform playback primitive the controller drives.

use super::PlayerError;
use super::state::{AudioData, EngineEvent, LoadToken};

/// Contract of an audio backend.
///
/// Every method is called from the UI thread and must return quickly.
/// Completions (`Prepared`, `TimeUpdate`, ...) are posted from the engine's
/// own threads and collected with [`poll_events`](Self::poll_events).
pub trait PlaybackEngine {
    /// Configure the process-wide audio session for playback.
    ///
    /// Called on every load; must be idempotent.
    fn configure_session(&mut self) -> Result<(), PlayerError>;

    /// Start preparing a resource. Completion arrives as
    /// [`EngineEvent::Prepared`] or [`EngineEvent::Failed`].
    fn prepare(&mut self, token: LoadToken, data: AudioData) -> Result<(), PlayerError>;

    fn play(&mut self) -> Result<(), PlayerError>;

    fn pause(&mut self) -> Result<(), PlayerError>;

    /// Seek to an absolute position in seconds.
    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError>;

    /// Drain pending events without blocking.
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
