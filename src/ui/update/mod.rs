//! Update handlers for application messages.
//!
//! This module is split into submodules for maintainability:
//! - `navigation`: Tabs and the browse route
//! - `panel`: Player panel gestures and the spring animation
//! - `player`: Song selection, playback and seeking
//! - `keyboard`: Shortcuts mapped onto the messages above
//! - `artwork`: Background artwork loading

mod artwork;
mod keyboard;
mod navigation;
mod panel;
mod player;

// Re-export all handler functions
pub use artwork::handle_artwork_loaded;
pub use keyboard::handle_keyboard;
pub use navigation::handle_navigation;
pub use panel::handle_panel;
pub use player::handle_player;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::artwork::{ArtworkError, ImageFetcher};
    use crate::player::AudioPlayerController;
    use crate::test_utils::{FakeEngine, mock_catalog};
    use crate::ui::state::AppState;

    /// Fetcher for tests that never reach the network.
    pub struct OfflineFetcher;

    #[async_trait]
    impl ImageFetcher for OfflineFetcher {
        async fn fetch(&self, _url: &str) -> Result<Vec<u8>, ArtworkError> {
            Err(ArtworkError::Network("offline".to_string()))
        }
    }

    /// App state over the mock catalog with a recording engine.
    pub fn app_state(engine: &FakeEngine) -> AppState {
        let controller = AudioPlayerController::new(Box::new(engine.clone()), true);
        AppState::new(mock_catalog(), controller, Arc::new(OfflineFetcher), None)
    }
}
