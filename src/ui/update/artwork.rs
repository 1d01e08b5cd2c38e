//! Background artwork loading.
//!
//! Requests are deduplicated by [`ArtworkCache::request`](crate::artwork::ArtworkCache::request),
//! so callers can ask for the same URL on every navigation without refetching.

use iced::Task;

use crate::artwork::{self, ArtworkData, ArtworkError};

use super::super::messages::Message;
use super::super::state::AppState;

/// Start loading `url` unless it is already pending or resolved.
pub(super) fn request_artwork(s: &mut AppState, url: &str) -> Task<Message> {
    if !s.artwork.request(url) {
        return Task::none();
    }

    tracing::debug!(target: "ui::artwork", url, known = s.artwork.len(), "Requesting artwork");
    let fetcher = s.fetcher.clone();
    let disk = s.disk_cache.clone();
    let url = url.to_string();
    let key = url.clone();
    Task::perform(artwork::load_artwork(fetcher, disk, url), move |result| {
        Message::ArtworkLoaded(key.clone(), result)
    })
}

/// Request artwork for several URLs at once.
pub(super) fn request_many<'a>(
    s: &mut AppState,
    urls: impl IntoIterator<Item = &'a str>,
) -> Task<Message> {
    let tasks: Vec<_> = urls
        .into_iter()
        .map(|url| request_artwork(s, url))
        .collect();
    Task::batch(tasks)
}

pub fn handle_artwork_loaded(
    s: &mut AppState,
    url: String,
    result: Result<ArtworkData, ArtworkError>,
) -> Task<Message> {
    if let Err(ref e) = result {
        tracing::debug!(target: "ui::artwork", url, "Artwork unavailable: {}", e);
    }
    s.artwork.resolve(&url, result);
    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::Artwork;
    use crate::test_utils::FakeEngine;
    use crate::ui::update::test_support::app_state;

    #[test]
    fn test_request_is_deduplicated() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);

        let _ = request_artwork(&mut s, "https://img.example.com/a.jpg");
        let _ = request_artwork(&mut s, "https://img.example.com/a.jpg");
        assert_eq!(s.artwork.len(), 1);
        assert!(matches!(
            s.artwork.get("https://img.example.com/a.jpg"),
            Some(Artwork::Pending)
        ));
    }

    #[test]
    fn test_failure_marks_failed() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);

        let _ = request_artwork(&mut s, "https://img.example.com/a.jpg");
        let _ = handle_artwork_loaded(
            &mut s,
            "https://img.example.com/a.jpg".to_string(),
            Err(ArtworkError::Status(404)),
        );
        assert!(matches!(
            s.artwork.get("https://img.example.com/a.jpg"),
            Some(Artwork::Failed)
        ));
        assert!(s.artwork.handle("https://img.example.com/a.jpg").is_none());
    }
}
