//! Audio player controller: the playback contract the UI depends on.
//!
//! # Load flow
//!
//! ```text
//! load(url) ──► LoadRequest{token} ──► fetch (async task) ──► fetch_completed
//!                                                                  │
//!                                                      engine.prepare(token)
//!                                                                  │
//!                         poll() ◄── EngineEvent::Prepared{token} ◄┘
//! ```
//!
//! Every step carries the [`LoadToken`] of the request it belongs to. A new
//! `load` supersedes the previous one; late completions for older tokens are
//! dropped.

use super::engine::PlaybackEngine;
use super::state::{AudioData, EngineEvent, LoadRequest, LoadState, LoadToken, PlaybackStatus};

/// Wraps a [`PlaybackEngine`] and owns the observable [`PlaybackStatus`].
pub struct AudioPlayerController {
    engine: Box<dyn PlaybackEngine>,
    status: PlaybackStatus,
    load_state: LoadState,
    token: LoadToken,
    autoplay: bool,
}

impl AudioPlayerController {
    pub fn new(engine: Box<dyn PlaybackEngine>, autoplay: bool) -> Self {
        Self {
            engine,
            status: PlaybackStatus::default(),
            load_state: LoadState::Idle,
            token: LoadToken::default(),
            autoplay,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_playing(&self) -> bool {
        self.status.is_playing
    }

    /// Token of the most recent load.
    pub fn current_token(&self) -> LoadToken {
        self.token
    }

    /// Whether the UI should show the "can't play" state.
    pub fn cannot_play(&self) -> bool {
        matches!(
            self.load_state,
            LoadState::Failed(_) | LoadState::Unavailable(_)
        )
    }

    /// Begin loading a resource.
    ///
    /// Resets time and duration to 0 and stops playback. Returns the request
    /// the caller must fetch, or `None` when the audio session could not be
    /// configured.
    pub fn load(&mut self, url: &str) -> Option<LoadRequest> {
        // The engine keeps playing the previous resource until it is told otherwise
        if self.load_state != LoadState::Idle {
            if let Err(e) = self.engine.pause() {
                tracing::debug!(target: "player::controller", "Stopping previous track failed: {}", e);
            }
        }

        self.token = LoadToken(self.token.0 + 1);
        self.status = PlaybackStatus::default();
        self.load_state = LoadState::Loading;

        if let Err(e) = self.engine.configure_session() {
            tracing::warn!(target: "player::controller", "Audio session setup failed: {}", e);
            self.load_state = LoadState::Unavailable(e.to_string());
            return None;
        }

        tracing::debug!(target: "player::controller", token = self.token.0, url, "Load requested");
        Some(LoadRequest {
            token: self.token,
            url: url.to_string(),
        })
    }

    /// Hand a fetched resource (or fetch error) to the engine.
    pub fn fetch_completed(&mut self, token: LoadToken, result: Result<AudioData, String>) {
        if token != self.token {
            tracing::debug!(target: "player::controller", token = token.0, "Ignoring stale fetch");
            return;
        }

        match result {
            Ok(data) => {
                if let Err(e) = self.engine.prepare(token, data) {
                    self.fail(e.to_string());
                }
            }
            Err(e) => self.fail(e),
        }
    }

    /// Start or resume playback. No-op unless a resource is ready.
    pub fn play(&mut self) {
        if self.status.is_playing || self.load_state != LoadState::Ready {
            return;
        }
        match self.engine.play() {
            Ok(()) => self.status.is_playing = true,
            Err(e) => tracing::warn!(target: "player::controller", "Play failed: {}", e),
        }
    }

    /// Pause playback. No-op unless playing.
    pub fn pause(&mut self) {
        if !self.status.is_playing {
            return;
        }
        match self.engine.pause() {
            Ok(()) => self.status.is_playing = false,
            Err(e) => tracing::warn!(target: "player::controller", "Pause failed: {}", e),
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.status.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Seek to `to` seconds, clamped to `[0, duration]`.
    ///
    /// Does not change whether audio is playing.
    pub fn seek(&mut self, to: f64) {
        if self.load_state != LoadState::Ready {
            return;
        }
        let target = if to.is_finite() {
            to.clamp(0.0, self.status.duration)
        } else {
            0.0
        };
        match self.engine.seek(target) {
            Ok(()) => self.status.current_time = target,
            Err(e) => tracing::warn!(target: "player::controller", "Seek failed: {}", e),
        }
    }

    /// Apply engine notifications. Must run on the UI thread.
    pub fn poll(&mut self) {
        for event in self.engine.poll_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: EngineEvent) {
        if event.token() != self.token {
            return;
        }

        match event {
            EngineEvent::Prepared { duration, .. } => {
                self.status.duration = duration.max(0.0);
                self.status.current_time = 0.0;
                self.load_state = LoadState::Ready;
                tracing::info!(target: "player::controller", "Ready ({:.1}s)", duration);
                if self.autoplay {
                    self.play();
                }
            }
            EngineEvent::TimeUpdate { seconds, .. } => {
                let seconds = seconds.max(0.0);
                self.status.current_time = if self.status.has_duration() {
                    seconds.min(self.status.duration)
                } else {
                    seconds
                };
            }
            EngineEvent::Finished { .. } => {
                self.status.is_playing = false;
                self.status.current_time = self.status.duration;
            }
            EngineEvent::Failed { reason, .. } => self.fail(reason),
        }
    }

    fn fail(&mut self, reason: String) {
        tracing::warn!(target: "player::controller", token = self.token.0, "Load failed: {}", reason);
        self.status = PlaybackStatus::default();
        self.load_state = LoadState::Failed(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{EngineCall, FakeEngine, audio_data};

    /// Controller with a fake engine, loaded and prepared to `duration`.
    fn ready_controller(duration: f64, autoplay: bool) -> (AudioPlayerController, FakeEngine) {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), autoplay);
        let request = controller.load("https://example.com/a.mp3").unwrap();
        controller.fetch_completed(request.token, Ok(audio_data()));
        engine.push_event(EngineEvent::Prepared {
            token: request.token,
            duration,
        });
        controller.poll();
        (controller, engine)
    }

    #[test]
    fn test_load_resets_status() {
        let (mut controller, engine) = ready_controller(200.0, true);
        engine.push_event(EngineEvent::TimeUpdate {
            token: controller.current_token(),
            seconds: 42.0,
        });
        controller.poll();
        assert_eq!(controller.status().current_time, 42.0);

        controller.load("https://example.com/b.mp3");
        let status = controller.status();
        assert_eq!(status.current_time, 0.0);
        assert_eq!(status.duration, 0.0);
        assert!(!status.is_playing);
        assert_eq!(controller.load_state(), &LoadState::Loading);
    }

    #[test]
    fn test_load_stops_previous_track() {
        let (mut controller, engine) = ready_controller(200.0, true);
        assert!(controller.is_playing());
        let before = engine.calls().len();

        let request = controller.load("https://example.com/b.mp3").unwrap();
        assert!(engine.calls()[before..].contains(&EngineCall::Pause));

        // Still silent when the new fetch fails
        controller.fetch_completed(request.token, Err("HTTP 404".to_string()));
        assert!(!controller.is_playing());
        assert!(!engine.calls()[before..].contains(&EngineCall::Play));
    }

    #[test]
    fn test_first_load_does_not_pause() {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        controller.load("https://example.com/a.mp3");
        assert!(!engine.calls().contains(&EngineCall::Pause));
    }

    #[test]
    fn test_prepared_sets_duration_and_autoplays() {
        let (controller, engine) = ready_controller(180.0, true);
        assert_eq!(controller.status().duration, 180.0);
        assert_eq!(controller.load_state(), &LoadState::Ready);
        assert!(controller.is_playing());
        assert!(engine.calls().contains(&EngineCall::Play));
    }

    #[test]
    fn test_no_autoplay() {
        let (controller, _engine) = ready_controller(180.0, false);
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_toggle_twice_from_stopped() {
        let (mut controller, _engine) = ready_controller(120.0, false);
        controller.toggle_playback();
        assert!(controller.is_playing());
        controller.toggle_playback();
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_play_and_pause_are_idempotent() {
        let (mut controller, engine) = ready_controller(120.0, false);
        controller.play();
        controller.play();
        controller.pause();
        controller.pause();
        let plays = engine.calls().iter().filter(|c| **c == EngineCall::Play).count();
        let pauses = engine.calls().iter().filter(|c| **c == EngineCall::Pause).count();
        assert_eq!(plays, 1);
        assert_eq!(pauses, 1);
    }

    #[test]
    fn test_play_without_resource_is_noop() {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        controller.play();
        assert!(!controller.is_playing());

        // Still loading: duration unknown
        controller.load("https://example.com/a.mp3");
        controller.play();
        assert!(!controller.is_playing());
        assert!(!engine.calls().contains(&EngineCall::Play));
    }

    #[test]
    fn test_seek_clamps_and_keeps_play_state() {
        let (mut controller, engine) = ready_controller(100.0, false);
        controller.seek(250.0);
        assert_eq!(controller.status().current_time, 100.0);
        controller.seek(-3.0);
        assert_eq!(controller.status().current_time, 0.0);
        controller.seek(42.0);
        assert_eq!(controller.status().current_time, 42.0);
        assert!(!controller.is_playing());
        assert_eq!(engine.last_seek(), Some(42.0));
    }

    #[test]
    fn test_session_failure_is_unavailable() {
        let engine = FakeEngine::new();
        engine.fail_session("no output device");
        let mut controller = AudioPlayerController::new(Box::new(engine), true);

        assert!(controller.load("https://example.com/a.mp3").is_none());
        assert!(controller.cannot_play());
        assert!(matches!(controller.load_state(), LoadState::Unavailable(_)));
        assert_eq!(controller.status().duration, 0.0);
        assert!(!controller.is_playing());
    }

    #[test]
    fn test_session_configured_on_every_load() {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        controller.load("a");
        controller.load("b");
        let configures = engine
            .calls()
            .iter()
            .filter(|c| **c == EngineCall::ConfigureSession)
            .count();
        assert_eq!(configures, 2);
    }

    #[test]
    fn test_fetch_failure_marks_failed() {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        let request = controller.load("https://bad.invalid/a.mp3").unwrap();
        controller.fetch_completed(request.token, Err("dns error".to_string()));

        assert!(controller.cannot_play());
        assert_eq!(controller.status().duration, 0.0);
        assert!(!controller.is_playing());
        assert!(engine.prepared_tokens().is_empty());
    }

    #[test]
    fn test_stale_completions_ignored() {
        let engine = FakeEngine::new();
        let mut controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        let first = controller.load("first").unwrap();
        let second = controller.load("second").unwrap();
        assert!(second.token > first.token);

        // Late fetch for the first request never reaches the engine
        controller.fetch_completed(first.token, Ok(audio_data()));
        assert!(engine.prepared_tokens().is_empty());

        // Late engine completion for the first request is dropped
        engine.push_event(EngineEvent::Prepared {
            token: first.token,
            duration: 99.0,
        });
        controller.poll();
        assert_eq!(controller.status().duration, 0.0);
        assert_eq!(controller.load_state(), &LoadState::Loading);

        controller.fetch_completed(second.token, Ok(audio_data()));
        assert_eq!(engine.prepared_tokens(), vec![second.token]);
    }

    #[test]
    fn test_finished_stops_at_end() {
        let (mut controller, engine) = ready_controller(60.0, true);
        engine.push_event(EngineEvent::Finished {
            token: controller.current_token(),
        });
        controller.poll();
        assert!(!controller.is_playing());
        assert_eq!(controller.status().current_time, 60.0);
    }

    #[test]
    fn test_time_update_clamped_to_duration() {
        let (mut controller, engine) = ready_controller(60.0, true);
        engine.push_event(EngineEvent::TimeUpdate {
            token: controller.current_token(),
            seconds: 61.5,
        });
        controller.poll();
        assert_eq!(controller.status().current_time, 60.0);
    }
}
