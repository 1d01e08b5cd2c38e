//! Message types for the Pocket Player UI.

use std::time::Instant;

use iced::keyboard;

use crate::artwork::{ArtworkData, ArtworkError};
use crate::model::SongType;
use crate::player::{AudioData, LoadToken};

use super::state::Tab;

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    TabSelected(Tab),
    OpenCategory(SongType),
    BackToCategories,
    SongSelected(String), // Song id from the catalog

    // Player panel gestures
    PanelPointerMoved { y: f32, height: f32 },
    PanelPressed,
    PanelReleased,
    PanelPointerLeft,
    AnimationTick(Instant),

    // Player messages
    PlayerToggle,
    PlayerPrevious,
    PlayerNext,
    PlayerSeekChanged(f64), // While dragging the slider
    PlayerSeekReleased,     // On release - seeks to the last dragged value
    PlayerSeekBy(f64),      // Relative seek in seconds (keyboard)
    PlayerTick,             // Drains engine events on the UI thread
    AudioFetched(LoadToken, Result<AudioData, String>),

    // Artwork
    ArtworkLoaded(String, Result<ArtworkData, ArtworkError>),

    // Keyboard
    KeyPressed(keyboard::Key, keyboard::Modifiers),
}

impl Message {
    /// Frequent or payload-heavy messages that should not be traced.
    pub fn is_noisy(&self) -> bool {
        matches!(
            self,
            Message::PlayerTick
                | Message::AnimationTick(_)
                | Message::PanelPointerMoved { .. }
                | Message::AudioFetched(..)
                | Message::ArtworkLoaded(..)
        )
    }
}
