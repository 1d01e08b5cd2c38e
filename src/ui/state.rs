//! Application state types for the Pocket Player UI.

use std::sync::Arc;
use std::time::Instant;

use crate::artwork::{ArtworkCache, DiskCache, ImageFetcher};
use crate::catalog::Catalog;
use crate::model::{Song, SongType};
use crate::player::AudioPlayerController;

use super::panel::PlayerPanel;

/// Bottom tab bar entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Playlist,
    Library,
    Profile,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Playlist, Tab::Library, Tab::Profile];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Playlist => "Playlist",
            Tab::Library => "Library",
            Tab::Profile => "Profile",
        }
    }
}

/// Navigation within the Home tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowseRoute {
    #[default]
    Categories,
    SongList(SongType),
}

/// What is selected for playback and how the player panel is presented.
///
/// Invariant: `expanded ⇒ shown ⇒ current_song.is_some()`. Fields are private
/// so that every write goes through an action that keeps it.
#[derive(Debug, Clone, Default)]
pub struct MediaPlayerState {
    current_song: Option<Song>,
    shown: bool,
    expanded: bool,
}

impl MediaPlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Make `song` current and show the panel. The expanded flag is kept.
    ///
    /// Returns whether anything changed.
    pub fn select_song(&mut self, song: Song) -> bool {
        let changed = !self.shown || self.current_song.as_ref() != Some(&song);
        self.current_song = Some(song);
        self.shown = true;
        changed
    }

    /// Flip between collapsed and expanded. Refused while hidden.
    pub fn toggle_expanded(&mut self) -> bool {
        self.set_expanded(!self.expanded)
    }

    /// Set the expanded flag. Expanding is refused while hidden.
    pub fn set_expanded(&mut self, expanded: bool) -> bool {
        if expanded && !self.shown {
            tracing::debug!(target: "ui::state", "Refusing to expand a hidden player");
            return false;
        }
        let changed = self.expanded != expanded;
        self.expanded = expanded;
        changed
    }

    pub fn collapse(&mut self) -> bool {
        self.set_expanded(false)
    }

    /// Whether the invariant holds. Used by tests.
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        (!self.expanded || self.shown) && (!self.shown || self.current_song.is_some())
    }
}

/// State for the running application
pub struct AppState {
    pub catalog: Catalog,

    // Navigation
    pub tab: Tab,
    pub route: BrowseRoute,

    // Player
    pub media: MediaPlayerState,
    pub panel: PlayerPanel,
    pub controller: AudioPlayerController,

    // Artwork (non-blocking, fetched in background)
    pub artwork: ArtworkCache,
    pub fetcher: Arc<dyn ImageFetcher>,
    pub disk_cache: Option<DiskCache>,

    /// Time of the previous animation frame
    pub last_frame: Option<Instant>,
}

impl AppState {
    pub fn new(
        catalog: Catalog,
        controller: AudioPlayerController,
        fetcher: Arc<dyn ImageFetcher>,
        disk_cache: Option<DiskCache>,
    ) -> Self {
        Self {
            catalog,
            tab: Tab::default(),
            route: BrowseRoute::default(),
            media: MediaPlayerState::new(),
            panel: PlayerPanel::new(),
            controller,
            artwork: ArtworkCache::new(),
            fetcher,
            disk_cache,
            last_frame: None,
        }
    }
}
