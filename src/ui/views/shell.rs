//! Tab shell: current screen, bottom tab bar, and the player overlay.

use iced::widget::{Space, Stack, button, column, container, responsive, row, text};
use iced::{Alignment, Element, Length, Size};

use crate::ui::messages::Message;
use crate::ui::state::{AppState, BrowseRoute, Tab};
use crate::ui::theme::{self, color, layout, typography};

use super::browse::browse;
use super::panel::player_panel;
use super::placeholder::placeholder;
use super::song_list::song_list;

pub fn shell(s: &AppState) -> Element<'_, Message> {
    responsive(move |size| layers(s, size)).into()
}

fn layers(s: &AppState, size: Size) -> Element<'_, Message> {
    let screen = match (s.tab, s.route) {
        (Tab::Home, BrowseRoute::Categories) => browse(s),
        (Tab::Home, BrowseRoute::SongList(song_type)) => song_list(s, song_type),
        (tab, _) => placeholder(tab),
    };

    // Keep the bottom of the screen clear of the collapsed bar
    let reserve = if s.media.is_shown() {
        layout::PLAYER_BAR_HEIGHT + layout::BAR_INSET * 2.0
    } else {
        0.0
    };

    let base = container(
        column![
            container(screen).width(Length::Fill).height(Length::Fill),
            Space::with_height(Length::Fixed(reserve)),
            tab_bar(s.tab),
        ]
        .width(Length::Fill)
        .height(Length::Fill),
    )
    .style(|_| theme::container_style(color::BASE));

    let mut layers = vec![base.into()];
    if let Some(panel) = player_panel(s, size.height) {
        layers.push(panel);
    }

    Stack::with_children(layers)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn tab_bar<'a>(active: Tab) -> Element<'a, Message> {
    let tabs = Tab::ALL.into_iter().map(|tab| {
        let style = if tab == active {
            theme::button_tab_active
        } else {
            theme::button_tab
        };

        button(container(text(tab.title()).size(typography::SIZE_SMALL)).center(Length::Fill))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(style)
        .on_press(Message::TabSelected(tab))
        .into()
    });

    container(row(tabs).align_y(Alignment::Center))
        .width(Length::Fill)
        .height(Length::Fixed(layout::TAB_BAR_HEIGHT))
        .style(|_| theme::container_style(color::SURFACE))
        .into()
}
