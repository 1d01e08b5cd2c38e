//! Song selection, playback and seeking handlers.
//!
//! # Control Flow
//!
//! All player commands flow through `handle_player()`. Keyboard shortcuts
//! are translated into the same messages, so a shortcut and a button press
//! take the same path.

use iced::Task;

use crate::player;

use super::super::messages::Message;
use super::super::state::AppState;
use super::artwork::request_artwork;

/// Seconds moved by a relative seek.
pub const SEEK_STEP: f64 = 5.0;

/// Handle player-related messages.
pub fn handle_player(s: &mut AppState, msg: Message) -> Task<Message> {
    match msg {
        Message::SongSelected(id) => select_song(s, &id),

        Message::PlayerToggle => {
            // Mid-edit the controller is paused on purpose; the button resumes
            if s.panel.is_seeking() {
                s.controller.play();
            } else {
                s.controller.toggle_playback();
            }
            Task::none()
        }

        // No queue yet, so skipping only swallows the press
        Message::PlayerPrevious | Message::PlayerNext => {
            tracing::debug!(target: "ui::player", "Skip ignored: no queue");
            Task::none()
        }

        Message::PlayerSeekChanged(value) => {
            if s.panel.seek_changed(value) {
                tracing::debug!(target: "ui::player", "Seek edit started, pausing");
                s.controller.pause();
            }
            Task::none()
        }

        Message::PlayerSeekReleased => {
            if let Some(target) = s.panel.seek_released() {
                tracing::debug!(target: "ui::player", "Seek released at {:.1}s", target);
                s.controller.seek(target);
                s.controller.play();
            }
            Task::none()
        }

        Message::PlayerSeekBy(delta) => {
            let status = s.controller.status();
            if !s.panel.is_seeking() && status.has_duration() {
                s.controller.seek(status.current_time + delta);
            }
            Task::none()
        }

        Message::PlayerTick => {
            s.controller.poll();
            Task::none()
        }

        Message::AudioFetched(token, result) => {
            s.controller.fetch_completed(token, result);
            Task::none()
        }

        _ => Task::none(),
    }
}

fn select_song(s: &mut AppState, id: &str) -> Task<Message> {
    let Some(song) = s.catalog.find(id).cloned() else {
        tracing::warn!(target: "ui::player", id, "Selected song is not in the catalog");
        return Task::none();
    };

    if !s.media.select_song(song.clone()) {
        tracing::debug!(target: "ui::player", id, "Song already current");
        return Task::none();
    }

    tracing::info!(target: "ui::player", "Now playing: {} - {}", song.title, song.display_name);
    s.panel.clear_seek();

    let artwork = request_artwork(s, &song.image_large_url);

    let Some(request) = s.controller.load(&song.audio_url) else {
        return artwork;
    };

    let token = request.token;
    let fetch = Task::perform(
        async move {
            player::fetch_audio(&request.url)
                .await
                .map_err(|e| e.to_string())
        },
        move |result| Message::AudioFetched(token, result),
    );

    Task::batch([fetch, artwork])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{EngineEvent, LoadState, LoadToken};
    use crate::test_utils::{EngineCall, FakeEngine, audio_data};
    use crate::ui::update::test_support::app_state;

    /// Select `id`, deliver its audio and the engine's Prepared event.
    fn ready(s: &mut AppState, engine: &FakeEngine, id: &str, duration: f64) -> LoadToken {
        let _ = handle_player(s, Message::SongSelected(id.to_string()));
        let token = s.controller.current_token();
        let _ = handle_player(s, Message::AudioFetched(token, Ok(audio_data())));
        engine.push_event(EngineEvent::Prepared { token, duration });
        let _ = handle_player(s, Message::PlayerTick);
        token
    }

    #[test]
    fn test_select_loads_and_autoplays() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);

        let token = ready(&mut s, &engine, "jazz-1", 120.0);

        assert!(s.media.is_shown());
        assert_eq!(engine.prepared_tokens(), vec![token]);
        assert_eq!(s.controller.load_state(), &LoadState::Ready);
        assert!(s.controller.is_playing());
        assert!(engine.calls().contains(&EngineCall::Play));
        // Artwork for the selected song was requested
        assert_eq!(s.artwork.len(), 1);
    }

    #[test]
    fn test_reselecting_current_song_does_not_reload() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        ready(&mut s, &engine, "jazz-1", 120.0);
        let before = s.controller.current_token();

        let _ = handle_player(&mut s, Message::SongSelected("jazz-1".to_string()));
        assert_eq!(s.controller.current_token(), before);
        assert!(s.controller.is_playing());
    }

    #[test]
    fn test_unknown_song_is_ignored() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let _ = handle_player(&mut s, Message::SongSelected("nope".to_string()));
        assert!(!s.media.is_shown());
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_stale_fetch_after_switching_songs() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);

        let _ = handle_player(&mut s, Message::SongSelected("jazz-1".to_string()));
        let first = s.controller.current_token();
        let _ = handle_player(&mut s, Message::SongSelected("rock-1".to_string()));
        let second = s.controller.current_token();

        let _ = handle_player(&mut s, Message::AudioFetched(first, Ok(audio_data())));
        assert!(engine.prepared_tokens().is_empty());

        let _ = handle_player(&mut s, Message::AudioFetched(second, Ok(audio_data())));
        assert_eq!(engine.prepared_tokens(), vec![second]);
    }

    #[test]
    fn test_switching_songs_silences_previous_one() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        ready(&mut s, &engine, "jazz-1", 100.0);
        assert!(s.controller.is_playing());
        let before = engine.calls().len();

        let _ = handle_player(&mut s, Message::SongSelected("rock-1".to_string()));
        let token = s.controller.current_token();
        let _ = handle_player(&mut s, Message::AudioFetched(token, Err("HTTP 404".to_string())));

        let after = engine.calls()[before..].to_vec();
        assert!(after.contains(&EngineCall::Pause));
        assert!(!after.contains(&EngineCall::Play));
        assert!(!s.controller.is_playing());
        assert!(s.controller.cannot_play());
    }

    #[test]
    fn test_skip_buttons_do_nothing() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let token = ready(&mut s, &engine, "jazz-1", 100.0);
        s.media.set_expanded(true);
        let before = engine.calls().len();

        let _ = handle_player(&mut s, Message::PlayerPrevious);
        let _ = handle_player(&mut s, Message::PlayerNext);

        assert_eq!(engine.calls().len(), before);
        assert_eq!(s.controller.current_token(), token);
        assert!(s.controller.is_playing());
        assert!(s.media.is_expanded());
    }

    #[test]
    fn test_fetch_failure_is_cannot_play() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let _ = handle_player(&mut s, Message::SongSelected("jazz-1".to_string()));
        let token = s.controller.current_token();

        let _ = handle_player(&mut s, Message::AudioFetched(token, Err("HTTP 404".to_string())));
        assert!(s.controller.cannot_play());
        assert!(s.media.is_shown());
    }

    #[test]
    fn test_session_failure_is_cannot_play() {
        let engine = FakeEngine::new();
        engine.fail_session("no output device");
        let mut s = app_state(&engine);

        let _ = handle_player(&mut s, Message::SongSelected("jazz-1".to_string()));
        assert!(matches!(s.controller.load_state(), LoadState::Unavailable(_)));
        assert!(s.controller.cannot_play());
    }

    #[test]
    fn test_toggle_twice() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        ready(&mut s, &engine, "jazz-1", 120.0);

        let _ = handle_player(&mut s, Message::PlayerToggle);
        assert!(!s.controller.is_playing());
        let _ = handle_player(&mut s, Message::PlayerToggle);
        assert!(s.controller.is_playing());
    }

    #[test]
    fn test_seek_edit_is_not_overwritten() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let token = ready(&mut s, &engine, "jazz-1", 120.0);

        let _ = handle_player(&mut s, Message::PlayerSeekChanged(30.0));
        assert!(!s.controller.is_playing());

        engine.push_event(EngineEvent::TimeUpdate { token, seconds: 5.0 });
        let _ = handle_player(&mut s, Message::PlayerTick);
        let _ = handle_player(&mut s, Message::PlayerSeekChanged(42.0));
        assert_eq!(s.panel.display_time(&s.controller.status()), 42.0);

        let _ = handle_player(&mut s, Message::PlayerSeekReleased);
        assert_eq!(engine.last_seek(), Some(42.0));
        assert!(s.controller.is_playing());
        assert_eq!(s.controller.status().current_time, 42.0);
        assert!(!s.panel.is_seeking());
    }

    #[test]
    fn test_play_button_mid_edit_resumes() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        ready(&mut s, &engine, "jazz-1", 120.0);

        let _ = handle_player(&mut s, Message::PlayerSeekChanged(10.0));
        assert!(!s.controller.is_playing());
        let _ = handle_player(&mut s, Message::PlayerToggle);
        assert!(s.controller.is_playing());
    }

    #[test]
    fn test_relative_seek_clamps() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        ready(&mut s, &engine, "jazz-1", 8.0);

        let _ = handle_player(&mut s, Message::PlayerSeekBy(SEEK_STEP));
        assert_eq!(engine.last_seek(), Some(5.0));
        let _ = handle_player(&mut s, Message::PlayerSeekBy(SEEK_STEP));
        assert_eq!(engine.last_seek(), Some(8.0));
        let _ = handle_player(&mut s, Message::PlayerSeekBy(-SEEK_STEP * 3.0));
        assert_eq!(engine.last_seek(), Some(0.0));
    }

    #[test]
    fn test_relative_seek_needs_duration() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let _ = handle_player(&mut s, Message::SongSelected("jazz-1".to_string()));

        let _ = handle_player(&mut s, Message::PlayerSeekBy(SEEK_STEP));
        assert_eq!(engine.last_seek(), None);
    }
}
