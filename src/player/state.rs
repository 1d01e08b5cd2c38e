//! Player state, engine command and event types.

use std::sync::Arc;

/// Observable playback status.
///
/// `duration == 0.0` means the duration is not known yet (loading).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackStatus {
    /// Whether audio is currently playing
    pub is_playing: bool,
    /// Elapsed time in seconds
    pub current_time: f64,
    /// Total duration in seconds (0 = unknown)
    pub duration: f64,
}

impl PlaybackStatus {
    /// Whether the duration is known.
    pub fn has_duration(&self) -> bool {
        self.duration > 0.0
    }

    /// Duration as MM:SS.
    pub fn duration_str(&self) -> String {
        time_string(self.duration)
    }
}

/// Where the current resource is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Fetching or preparing the resource
    Loading,
    /// Prepared, duration known, ready to play
    Ready,
    /// The resource could not be fetched or decoded
    Failed(String),
    /// The audio session could not be configured
    Unavailable(String),
}

/// Identifies one `load()` request.
///
/// Tokens are issued in increasing order; completions carrying a token
/// other than the latest one are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadToken(pub u64);

/// A load that the caller must fetch asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub token: LoadToken,
    pub url: String,
}

/// Encoded audio ready to hand to an engine.
#[derive(Clone)]
pub struct AudioData {
    /// Raw encoded bytes
    pub bytes: Arc<[u8]>,
    /// File extension hint for the format probe (e.g. "mp3")
    pub extension: Option<String>,
}

impl std::fmt::Debug for AudioData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioData")
            .field("bytes", &self.bytes.len())
            .field("extension", &self.extension)
            .finish()
    }
}

/// Commands sent to the decoder thread.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Open a new resource, replacing any previous one
    Prepare(LoadToken, AudioData),
    /// Start/resume playback
    Play,
    /// Pause playback
    Pause,
    /// Seek to an absolute position in seconds
    Seek(f64),
    /// Shutdown the decoder thread
    Shutdown,
}

/// Notifications posted by an engine from its own threads.
///
/// These are drained on the UI thread by
/// [`AudioPlayerController::poll`](super::AudioPlayerController::poll).
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Resource opened, duration known
    Prepared { token: LoadToken, duration: f64 },
    /// Periodic position update while playing
    TimeUpdate { token: LoadToken, seconds: f64 },
    /// Reached end of stream
    Finished { token: LoadToken },
    /// Resource could not be opened or decoding failed
    Failed { token: LoadToken, reason: String },
}

impl EngineEvent {
    pub fn token(&self) -> LoadToken {
        match self {
            EngineEvent::Prepared { token, .. }
            | EngineEvent::TimeUpdate { token, .. }
            | EngineEvent::Finished { token }
            | EngineEvent::Failed { token, .. } => *token,
        }
    }
}

/// Format seconds as MM:SS.
///
/// Minutes are zero-padded to two digits and grow past two digits only when
/// needed. Negative or non-finite input renders as `00:00`.
pub fn time_string(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_time_string() {
        assert_eq!(time_string(75.0), "01:15");
        assert_eq!(time_string(0.0), "00:00");
        assert_eq!(time_string(3599.0), "59:59");
        assert_eq!(time_string(3600.0), "60:00");
        assert_eq!(time_string(6000.0), "100:00");
        assert_eq!(time_string(59.9), "00:59");
    }

    #[test]
    fn test_time_string_bad_input() {
        assert_eq!(time_string(-5.0), "00:00");
        assert_eq!(time_string(f64::NAN), "00:00");
        assert_eq!(time_string(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_status_default_is_unknown_duration() {
        let status = PlaybackStatus::default();
        assert!(!status.is_playing);
        assert!(!status.has_duration());
        assert_eq!(status.duration_str(), "00:00");
    }

    #[test]
    fn test_event_token() {
        let event = EngineEvent::Finished { token: LoadToken(7) };
        assert_eq!(event.token(), LoadToken(7));
    }

    proptest! {
        /// Seconds part is always two digits and below 60
        #[test]
        fn time_string_shape(secs in 0u32..1_000_000) {
            let s = time_string(secs as f64);
            let (mins, rest) = s.split_once(':').unwrap();
            prop_assert_eq!(rest.len(), 2);
            prop_assert!(mins.len() >= 2);
            let m: u64 = mins.parse().unwrap();
            let r: u64 = rest.parse().unwrap();
            prop_assert!(r < 60);
            prop_assert_eq!(m * 60 + r, secs as u64);
        }
    }
}
