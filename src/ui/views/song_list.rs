//! Songs of one category.

use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{Space, button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::model::{Song, SongType};
use crate::ui::icons;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, layout, spacing, typography};

use super::helpers::{artwork, song_count};

pub fn song_list(s: &AppState, song_type: SongType) -> Element<'_, Message> {
    let back = button(text(icons::BACK).size(typography::SIZE_BODY))
        .padding([spacing::XS, spacing::SM])
        .style(theme::button_ghost)
        .on_press(Message::BackToCategories);

    let count = s.catalog.count_of(song_type);
    let header = column![
        text(song_type.title())
            .size(typography::SIZE_TITLE)
            .color(color::TEXT_PRIMARY),
        text(song_count(count))
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
    ]
    .spacing(spacing::XS);

    let body: Element<'_, Message> = if count == 0 {
        container(
            text("No songs in this category yet")
                .size(typography::SIZE_BODY)
                .color(color::TEXT_MUTED),
        )
        .center_x(Length::Fill)
        .padding(spacing::XL)
        .into()
    } else {
        let current = s.media.current_song().map(|song| song.id.as_str());
        let rows = s
            .catalog
            .songs_of(song_type)
            .map(|song| song_row(s, song, current == Some(song.id.as_str())));

        scrollable(column(rows).spacing(spacing::XS))
            .direction(Direction::Vertical(Scrollbar::new().width(0).scroller_width(0)))
            .height(Length::Fill)
            .into()
    };

    column![back, header, body]
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn song_row<'a>(s: &AppState, song: &'a Song, is_current: bool) -> Element<'a, Message> {
    let title_color = if is_current {
        color::PRIMARY
    } else {
        color::TEXT_PRIMARY
    };

    let info = column![
        text(&song.title)
            .size(typography::SIZE_BODY)
            .color(title_color),
        text(&song.display_name)
            .size(typography::SIZE_SMALL)
            .color(color::TEXT_SECONDARY),
    ]
    .spacing(2);

    button(
        row![
            artwork(s, &song.image_large_url, layout::ROW_THUMB),
            info,
            Space::with_width(Length::Fill),
        ]
        .spacing(spacing::MD)
        .align_y(Alignment::Center),
    )
    .padding(spacing::SM)
    .width(Length::Fill)
    .style(theme::button_ghost)
    .on_press(Message::SongSelected(song.id.clone()))
    .into()
}
