//! UI module for Pocket Player.

mod icons;
mod messages;
mod panel;
mod state;
pub mod theme;
mod update;
mod views;

use std::sync::Arc;
use std::time::{Duration, Instant};

use iced::{Element, Subscription, Task, Theme, keyboard, time};

use crate::artwork::HttpImageFetcher;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::player::{AudioPlayerController, CpalEngine};

pub use messages::Message;
use state::AppState;

/// Player ticks drain engine events; time updates arrive every ~500 ms
const PLAYER_TICK: Duration = Duration::from_millis(250);

/// ~60fps while the sheet springs back
const ANIMATION_TICK: Duration = Duration::from_millis(16);

pub struct PocketPlayer {
    state: AppState,
}

impl PocketPlayer {
    pub fn new(config: Config, catalog: Catalog) -> (Self, Task<Message>) {
        let ui_init_start = Instant::now();
        tracing::debug!("UI::new() started");

        let engine = CpalEngine::new(config.player.time_update_interval(), config.player.volume);
        let controller = AudioPlayerController::new(Box::new(engine), config.player.autoplay);
        let disk_cache = config.artwork.disk_cache();

        let state = AppState::new(
            catalog,
            controller,
            Arc::new(HttpImageFetcher::default()),
            disk_cache,
        );

        tracing::debug!(
            "UI::new() finished in {:.1}ms ({} songs)",
            ui_init_start.elapsed().as_secs_f64() * 1000.0,
            state.catalog.len()
        );

        (Self { state }, Task::none())
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let s = &self.state;
        let mut subscriptions = Vec::new();

        // Engine events only matter while something is selected
        if s.media.is_shown() {
            subscriptions.push(time::every(PLAYER_TICK).map(|_| Message::PlayerTick));
        }

        if s.panel.is_animating() {
            subscriptions.push(time::every(ANIMATION_TICK).map(Message::AnimationTick));
        }

        subscriptions.push(keyboard::on_key_press(|key, modifiers| {
            Some(Message::KeyPressed(key, modifiers))
        }));

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::shell(&self.state)
    }

    pub fn theme(&self) -> Theme {
        theme::app_theme()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !message.is_noisy() {
            tracing::trace!(target: "ui::update", message = ?message, "Update received");
        }

        let s = &mut self.state;

        match message {
            // Navigation
            Message::TabSelected(_) | Message::OpenCategory(_) | Message::BackToCategories => {
                update::handle_navigation(s, message)
            }

            // Panel gestures
            Message::PanelPointerMoved { .. }
            | Message::PanelPressed
            | Message::PanelReleased
            | Message::PanelPointerLeft
            | Message::AnimationTick(_) => update::handle_panel(s, message),

            // Playback
            Message::SongSelected(_)
            | Message::PlayerToggle
            | Message::PlayerPrevious
            | Message::PlayerNext
            | Message::PlayerSeekChanged(_)
            | Message::PlayerSeekReleased
            | Message::PlayerSeekBy(_)
            | Message::PlayerTick
            | Message::AudioFetched(..) => update::handle_player(s, message),

            Message::ArtworkLoaded(url, result) => update::handle_artwork_loaded(s, url, result),

            Message::KeyPressed(key, modifiers) => update::handle_keyboard(s, key, modifiers),
        }
    }
}
