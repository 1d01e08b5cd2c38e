//! Player panel gesture handling.
//!
//! The panel view reports raw pointer input; [`PlayerPanel`](crate::ui::panel::PlayerPanel)
//! turns it into taps and drags, and this handler applies the outcome to
//! [`MediaPlayerState`](crate::ui::state::MediaPlayerState).

use iced::Task;

use super::super::messages::Message;
use super::super::panel::PanelAction;
use super::super::state::AppState;

/// Longest frame step fed to the spring, in seconds
const MAX_FRAME_DT: f32 = 0.05;

pub fn handle_panel(s: &mut AppState, msg: Message) -> Task<Message> {
    let expanded = s.media.is_expanded();

    match msg {
        Message::PanelPointerMoved { y, height } => {
            s.panel.pointer_moved(y, height, expanded);
        }

        Message::PanelPressed => {
            if s.media.is_shown() {
                s.panel.pressed();
            }
        }

        Message::PanelReleased => match s.panel.released(expanded) {
            PanelAction::ToggleExpanded => {
                s.media.toggle_expanded();
                tracing::debug!(target: "ui::panel", expanded = s.media.is_expanded(), "Panel tapped");
            }
            PanelAction::Dismiss => {
                s.media.set_expanded(false);
                tracing::debug!(target: "ui::panel", "Panel dismissed by drag");
            }
            PanelAction::None => {
                if s.panel.is_animating() {
                    s.last_frame = None;
                }
            }
        },

        Message::PanelPointerLeft => {
            s.panel.cancel();
            if s.panel.is_animating() {
                s.last_frame = None;
            }
        }

        Message::AnimationTick(now) => {
            let dt = s
                .last_frame
                .map(|last| now.saturating_duration_since(last).as_secs_f32())
                .unwrap_or(0.0)
                .min(MAX_FRAME_DT);
            s.panel.animate(dt);
            s.last_frame = s.panel.is_animating().then_some(now);
        }

        _ => {}
    }

    Task::none()
}

/// Collapse the sheet without animation. Used by the Escape shortcut.
pub(super) fn collapse(s: &mut AppState) {
    s.panel.cancel();
    if s.media.collapse() {
        s.panel.reset_offset();
        s.last_frame = None;
    }
}
