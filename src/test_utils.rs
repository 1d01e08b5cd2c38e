//! Test utilities and fixtures for pocket-player tests.
//!
//! Provides song fixtures and a recording [`FakeEngine`] that stands in for
//! the audio backend.
//!
//! # Example
//!
//! ```ignore
//! let engine = FakeEngine::new();
//! let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
//! controller.load("https://example.com/a.mp3");
//! assert!(engine.calls().contains(&EngineCall::ConfigureSession));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

use crate::catalog::Catalog;
use crate::model::{Song, SongType};
use crate::player::{AudioData, EngineEvent, LoadToken, PlaybackEngine, PlayerError};

/// Creates a Song with sensible defaults.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let song = Song { title: "Custom".to_string(), ..mock_song("id") };
/// ```
pub fn mock_song(id: &str) -> Song {
    Song {
        id: id.to_string(),
        title: format!("Song {id}"),
        display_name: "Test Artist".to_string(),
        image_large_url: format!("https://img.example.com/{id}.jpg"),
        audio_url: format!("https://audio.example.com/{id}.mp3"),
        song_type: SongType::Pop,
    }
}

/// A small catalog: two jazz songs, one rock song, nothing else.
pub fn mock_catalog() -> Catalog {
    let typed = |id: &str, song_type| Song {
        song_type,
        ..mock_song(id)
    };
    Catalog::new(vec![
        typed("jazz-1", SongType::Jazz),
        typed("rock-1", SongType::Rock),
        typed("jazz-2", SongType::Jazz),
    ])
    .expect("fixture ids are unique")
}

/// Minimal audio payload for engine calls.
pub fn audio_data() -> AudioData {
    AudioData {
        bytes: Arc::from(vec![0u8; 16]),
        extension: Some("mp3".to_string()),
    }
}

/// Calls recorded by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    ConfigureSession,
    Prepare(LoadToken),
    Play,
    Pause,
    Seek(f64),
}

#[derive(Default)]
struct FakeEngineInner {
    calls: Vec<EngineCall>,
    pending: Vec<EngineEvent>,
    session_error: Option<String>,
}

/// Recording engine. Clones share the same log, so a test can keep one
/// handle while the controller owns another.
#[derive(Clone, Default)]
pub struct FakeEngine {
    inner: Arc<Mutex<FakeEngineInner>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `configure_session` fail from now on.
    pub fn fail_session(&self, reason: &str) {
        self.inner.lock().session_error = Some(reason.to_string());
    }

    /// Queue an event for the next `poll_events`.
    pub fn push_event(&self, event: EngineEvent) {
        self.inner.lock().pending.push(event);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().calls.clone()
    }

    pub fn prepared_tokens(&self) -> Vec<LoadToken> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                EngineCall::Prepare(token) => Some(token),
                _ => None,
            })
            .collect()
    }

    pub fn last_seek(&self) -> Option<f64> {
        self.calls().into_iter().rev().find_map(|c| match c {
            EngineCall::Seek(s) => Some(s),
            _ => None,
        })
    }
}

impl PlaybackEngine for FakeEngine {
    fn configure_session(&mut self) -> Result<(), PlayerError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::ConfigureSession);
        match &inner.session_error {
            Some(reason) => Err(PlayerError::Session(reason.clone())),
            None => Ok(()),
        }
    }

    fn prepare(&mut self, token: LoadToken, _data: AudioData) -> Result<(), PlayerError> {
        self.inner.lock().calls.push(EngineCall::Prepare(token));
        Ok(())
    }

    fn play(&mut self) -> Result<(), PlayerError> {
        self.inner.lock().calls.push(EngineCall::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.inner.lock().calls.push(EngineCall::Pause);
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<(), PlayerError> {
        self.inner.lock().calls.push(EngineCall::Seek(seconds));
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.inner.lock().pending)
    }
}
