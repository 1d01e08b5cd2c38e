//! Tab and browse navigation.

use iced::Task;

use super::super::messages::Message;
use super::super::state::{AppState, BrowseRoute, Tab};
use super::artwork::request_many;

pub fn handle_navigation(s: &mut AppState, msg: Message) -> Task<Message> {
    match msg {
        Message::TabSelected(tab) => {
            // Re-selecting Home pops back to the categories
            if tab == Tab::Home && s.tab == Tab::Home {
                s.route = BrowseRoute::Categories;
            }
            s.tab = tab;
            Task::none()
        }

        Message::OpenCategory(song_type) => {
            tracing::debug!(target: "ui::navigation", category = song_type.key(), "Opening category");
            s.tab = Tab::Home;
            s.route = BrowseRoute::SongList(song_type);

            let urls: Vec<String> = s
                .catalog
                .songs_of(song_type)
                .map(|song| song.image_large_url.clone())
                .collect();
            request_many(s, urls.iter().map(String::as_str))
        }

        Message::BackToCategories => {
            s.route = BrowseRoute::Categories;
            Task::none()
        }

        _ => Task::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SongType;
    use crate::test_utils::FakeEngine;
    use crate::ui::update::test_support::app_state;

    #[test]
    fn test_open_category_and_back() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);

        let _ = handle_navigation(&mut s, Message::OpenCategory(SongType::Jazz));
        assert_eq!(s.route, BrowseRoute::SongList(SongType::Jazz));
        // Both jazz songs have their artwork requested
        assert_eq!(s.artwork.len(), 2);

        let _ = handle_navigation(&mut s, Message::BackToCategories);
        assert_eq!(s.route, BrowseRoute::Categories);
    }

    #[test]
    fn test_reselect_home_pops_to_categories() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let _ = handle_navigation(&mut s, Message::OpenCategory(SongType::Rock));

        let _ = handle_navigation(&mut s, Message::TabSelected(Tab::Library));
        assert_eq!(s.tab, Tab::Library);
        assert_eq!(s.route, BrowseRoute::SongList(SongType::Rock));

        let _ = handle_navigation(&mut s, Message::TabSelected(Tab::Home));
        assert_eq!(s.route, BrowseRoute::SongList(SongType::Rock));

        let _ = handle_navigation(&mut s, Message::TabSelected(Tab::Home));
        assert_eq!(s.route, BrowseRoute::Categories);
    }

    #[test]
    fn test_empty_category_requests_nothing() {
        let engine = FakeEngine::new();
        let mut s = app_state(&engine);
        let _ = handle_navigation(&mut s, Message::OpenCategory(SongType::Ambient));
        assert!(s.artwork.is_empty());
    }
}
