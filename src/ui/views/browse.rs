//! Home tab: two horizontally scrolling rows of category tiles.

use iced::alignment::Vertical;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{Column, button, column, container, row, scrollable, text};
use iced::{Element, Length};

use crate::model::SongType;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, layout, spacing, typography};

use super::helpers::song_count;

pub fn browse(s: &AppState) -> Element<'_, Message> {
    let hits = SongType::ALL;
    let mut trending = SongType::ALL;
    trending.reverse();

    let content: Column<'_, Message> = column![
        text("Browse")
            .size(typography::SIZE_TITLE)
            .color(color::TEXT_PRIMARY),
        section(s, "Today's Biggest Hits", &hits),
        section(s, "Trending Genres", &trending),
    ]
    .spacing(spacing::XL)
    .padding(spacing::LG);

    scrollable(content)
        .direction(Direction::Vertical(Scrollbar::new().width(0).scroller_width(0)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn section<'a>(s: &AppState, title: &'a str, types: &[SongType]) -> Element<'a, Message> {
    let tiles = types.iter().map(|&song_type| tile(song_type, s.catalog.count_of(song_type)));

    column![
        text(title)
            .size(typography::SIZE_HEADING)
            .color(color::TEXT_PRIMARY),
        scrollable(row(tiles).spacing(spacing::MD))
            .direction(Direction::Horizontal(
                Scrollbar::new().width(0).scroller_width(0),
            ))
            .width(Length::Fill),
    ]
    .spacing(spacing::SM)
    .into()
}

fn tile<'a>(song_type: SongType, count: usize) -> Element<'a, Message> {
    let tint = song_type.tint();
    let label = column![
        text(song_type.title())
            .size(typography::SIZE_HEADING)
            .color(color::TEXT_PRIMARY),
        text(song_count(count))
            .size(typography::SIZE_SMALL)
            .color(color::with_alpha(color::TEXT_PRIMARY, 0.8)),
    ]
    .spacing(spacing::XS);

    button(
        container(label)
            .width(Length::Fixed(layout::TILE_SIZE))
            .height(Length::Fixed(layout::TILE_SIZE))
            .padding(spacing::MD)
            .align_y(Vertical::Bottom)
            .style(move |_| theme::tile_style(tint)),
    )
    .padding(0)
    .style(theme::button_bare)
    .on_press(Message::OpenCategory(song_type))
    .into()
}
