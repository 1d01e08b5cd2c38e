//! Keyboard shortcut handling.
//!
//! Maps keyboard events to player and panel actions. Every shortcut reuses
//! the message its on-screen counterpart sends.

use iced::Task;
use iced::keyboard::{self, key};

use super::super::messages::Message;
use super::super::state::AppState;
use super::panel::collapse;
use super::player::SEEK_STEP;

/// Handle keyboard shortcuts.
///
/// Returns a Task if the key triggered an action, or Task::none() if unhandled.
pub fn handle_keyboard(
    s: &mut AppState,
    key: keyboard::Key,
    modifiers: keyboard::Modifiers,
) -> Task<Message> {
    if !s.media.is_shown() {
        return Task::none();
    }

    match key.as_ref() {
        // Space: Play/Pause toggle
        keyboard::Key::Named(key::Named::Space) if modifiers.is_empty() => {
            tracing::debug!(target: "ui::keyboard", "Space pressed - toggling playback");
            Task::done(Message::PlayerToggle)
        }

        // Escape: collapse the expanded player
        keyboard::Key::Named(key::Named::Escape) => {
            if s.media.is_expanded() {
                tracing::debug!(target: "ui::keyboard", "Escape pressed - collapsing player");
                collapse(s);
            }
            Task::none()
        }

        // Shift+Left/Right: Seek backward/forward
        keyboard::Key::Named(key::Named::ArrowLeft) if modifiers.shift() => {
            tracing::debug!(target: "ui::keyboard", "Shift+Left - seeking back {}s", SEEK_STEP);
            Task::done(Message::PlayerSeekBy(-SEEK_STEP))
        }
        keyboard::Key::Named(key::Named::ArrowRight) if modifiers.shift() => {
            tracing::debug!(target: "ui::keyboard", "Shift+Right - seeking forward {}s", SEEK_STEP);
            Task::done(Message::PlayerSeekBy(SEEK_STEP))
        }

        _ => Task::none(),
    }
}
